pub mod answers;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod options;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::{
    CreateOptionRequest, CreateQuestionRequest, SetCanonicalAnswerRequest,
};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建题目
    pub async fn create_question(
        &self,
        request: &HttpRequest,
        req: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, req).await
    }

    /// 获取题目详情（出题人可见标准答案）
    pub async fn get_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_question(self, request, question_id).await
    }

    /// 列出考核下的题目
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, assessment_id).await
    }

    /// 为选择题添加选项
    pub async fn create_option(
        &self,
        request: &HttpRequest,
        question_id: i64,
        req: CreateOptionRequest,
    ) -> ActixResult<HttpResponse> {
        options::create_option(self, request, question_id, req).await
    }

    /// 设置标准答案
    pub async fn set_canonical_answer(
        &self,
        request: &HttpRequest,
        question_id: i64,
        req: SetCanonicalAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        answers::set_canonical_answer(self, request, question_id, req).await
    }

    /// 删除题目
    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, question_id).await
    }
}
