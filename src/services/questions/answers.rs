use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::errors::MLSystemError;
use crate::middlewares::RequireJWT;
use crate::models::questions::requests::SetCanonicalAnswerRequest;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;

pub async fn set_canonical_answer(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    req: SetCanonicalAnswerRequest,
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

    match storage.set_canonical_answer(question_id, req).await {
        Ok(answer) => Ok(HttpResponse::Created().json(ApiResponse::success(answer, "创建成功"))),
        Err(MLSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::QuestionNotFound, msg))),
        // 判断题第二条标准答案在写入时被拒绝
        Err(MLSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DuplicateCanonicalAnswer, msg),
        )),
        Err(MLSystemError::Validation(msg)) => Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建标准答案失败: {e}"),
            )),
        ),
    }
}
