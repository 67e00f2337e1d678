use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeAnswersRequest, SubmissionListParams, SubmissionListQuery,
    SubmitAnswersRequest,
};
use crate::services::SubmissionService;
use crate::utils::SafeSubmissionIdI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 批量录入作答
pub async fn submit_answers(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    body: web::Json<SubmitAnswersRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit_answers(&req, submission_id.0, body.into_inner())
        .await
}

// 人工批改
pub async fn grade_answers(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    body: web::Json<GradeAnswersRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_answers(&req, submission_id.0, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, submission_id.0).await
}

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    params: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    let params = params.into_inner();
    let query = SubmissionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        assessment_id: params.assessment_id,
        student_id: params.student_id,
        graded: params.graded,
    };
    SUBMISSION_SERVICE.list_submissions(&req, query).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("", web::post().to(create_submission))
            .route("/{submission_id}", web::get().to(get_submission))
            .route(
                "/{submission_id}/answers",
                web::post().to(submit_answers),
            )
            .route("/{submission_id}/grade", web::patch().to(grade_answers)),
    );
}
