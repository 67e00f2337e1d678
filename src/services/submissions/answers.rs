use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::MLSystemError;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::SubmitAnswersRequest;
use crate::models::submissions::responses::SubmitAnswersResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn submit_answers(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: SubmitAnswersRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 提交必须存在且属于当前用户
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
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
    };

    if submission.student_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能为自己的提交作答",
        )));
    }

    if req.answers.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "作答列表不能为空",
        )));
    }

    match storage.submit_answers(submission_id, req.answers).await {
        Ok((answers, auto_graded_score)) => {
            let response = SubmitAnswersResponse {
                answers,
                auto_graded_score,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "作答已录入")))
        }
        // 未知题目/选项使整批失败，不静默跳过
        Err(MLSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::QuestionNotFound, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("录入作答失败: {e}"),
            )),
        ),
    }
}
