use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::errors::MLSystemError;
use crate::middlewares::RequireJWT;
use crate::models::questions::requests::CreateOptionRequest;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;

pub async fn create_option(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    req: CreateOptionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(resp) = require_capability(&current_user, Capability::AuthorQuestions) {
        return Ok(*resp);
    }

    match storage.create_question_option(question_id, req).await {
        Ok(option) => Ok(HttpResponse::Created().json(ApiResponse::success(option, "创建成功"))),
        Err(MLSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::QuestionNotFound, msg))),
        Err(MLSystemError::Validation(msg)) => Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建选项失败: {e}"),
            )),
        ),
    }
}
