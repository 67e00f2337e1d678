pub mod answers;
pub mod create;
pub mod detail;
pub mod grade;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeAnswersRequest, SubmissionListQuery, SubmitAnswersRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    /// 创建提交（准入检查）
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 批量录入作答并即时判分
    pub async fn submit_answers(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: SubmitAnswersRequest,
    ) -> ActixResult<HttpResponse> {
        answers::submit_answers(self, request, submission_id, req).await
    }

    /// 人工批改并重算最终成绩
    pub async fn grade_answers(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: GradeAnswersRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_answers(self, request, submission_id, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }
}
