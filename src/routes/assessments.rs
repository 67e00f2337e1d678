use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::assessments::requests::{
    AssessmentListParams, AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 创建考核
pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(&req, body.into_inner())
        .await
}

// 获取考核详情
pub async fn get_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(&req, id.0).await
}

// 列出考核
pub async fn list_assessments(
    req: HttpRequest,
    params: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    let params = params.into_inner();
    let query = AssessmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        unit_id: params.unit_id,
        module_id: params.module_id,
        search: params.search,
        approved_only: false, // 服务层按调用方能力收紧
    };
    ASSESSMENT_SERVICE.list_assessments(&req, query).await
}

// 更新考核
pub async fn update_assessment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(&req, id.0, body.into_inner())
        .await
}

// 删除考核
pub async fn delete_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assessment(&req, id.0).await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(RequireJWT)
            .route("", web::get().to(list_assessments))
            .route("", web::post().to(create_assessment))
            .route("/{id}", web::get().to(get_assessment))
            .route("/{id}", web::patch().to(update_assessment))
            .route("/{id}", web::delete().to(delete_assessment)),
    );
}
