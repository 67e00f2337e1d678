pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
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

    /// 创建考核
    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        req: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, req).await
    }

    /// 获取考核详情（含按请求时刻计算的可用性）
    pub async fn get_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, request, assessment_id).await
    }

    /// 列出考核
    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, query).await
    }

    /// 更新考核（含审批开关）
    pub async fn update_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        req: UpdateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assessment(self, request, assessment_id, req).await
    }

    /// 删除考核
    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, assessment_id).await
    }
}
