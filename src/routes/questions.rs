use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::questions::requests::{
    CreateOptionRequest, CreateQuestionRequest, SetCanonicalAnswerRequest,
};
use crate::services::QuestionService;
use crate::utils::{SafeAssessmentIdI64, SafeQuestionIdI64};

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

// 创建题目
pub async fn create_question(
    req: HttpRequest,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.create_question(&req, body.into_inner()).await
}

// 获取题目详情
pub async fn get_question(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_question(&req, question_id.0).await
}

// 列出考核下的题目
pub async fn list_questions(
    req: HttpRequest,
    assessment_id: SafeAssessmentIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_questions(&req, assessment_id.0).await
}

// 为选择题添加选项
pub async fn create_option(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
    body: web::Json<CreateOptionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_option(&req, question_id.0, body.into_inner())
        .await
}

// 设置标准答案
pub async fn set_canonical_answer(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
    body: web::Json<SetCanonicalAnswerRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .set_canonical_answer(&req, question_id.0, body.into_inner())
        .await
}

// 删除题目
pub async fn delete_question(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(&req, question_id.0).await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(RequireJWT)
            .route("", web::post().to(create_question))
            .route("/{question_id}", web::get().to(get_question))
            .route("/{question_id}", web::delete().to(delete_question))
            .route("/{question_id}/options", web::post().to(create_option))
            .route(
                "/{question_id}/answers",
                web::post().to(set_canonical_answer),
            ),
    );

    // 考核相关的题目路由
    cfg.service(
        web::scope("/api/v1/assessments/{assessment_id}/questions")
            .wrap(RequireJWT)
            .route("", web::get().to(list_questions)),
    );
}
