use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::MLSystemError;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::GradeAnswersRequest;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;

pub async fn grade_answers(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: GradeAnswersRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(resp) = require_capability(&current_user, Capability::GradeSubmissions) {
        return Ok(*resp);
    }

    // 先确认提交存在，便于与“作答记录不存在”区分开
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    }

    let now = chrono::Utc::now();

    match storage
        .grade_answers(submission_id, req.graded_answers, req.feedback, now)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Submission {} graded by user {} (final grade: {:?})",
                submission_id,
                current_user.id,
                submission.grade
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "批改完成")))
        }
        Err(MLSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AnswerNotFound, msg))),
        // 批改目标不属于该提交
        Err(MLSystemError::Validation(msg)) => Ok(HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::AnswerSubmissionMismatch, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("批改失败: {e}"),
            )),
        ),
    }
}
