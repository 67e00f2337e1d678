use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::responses::{SubmissionDetail, SubmissionStudent};
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

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

    // 学生只能查看自己的提交；批改方可以查看全部
    if submission.student_id != current_user.id
        && !current_user
            .role
            .has_capability(Capability::GradeSubmissions)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己的提交",
        )));
    }

    let answers = match storage.list_student_answers(submission_id).await {
        Ok(answers) => answers,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作答失败: {e}"),
                )),
            );
        }
    };

    let student = match storage.get_user_by_id(submission.student_id).await {
        Ok(Some(user)) => Some(SubmissionStudent {
            id: user.id,
            username: user.username,
            profile_name: user.profile_name,
        }),
        _ => None,
    };

    let detail = SubmissionDetail {
        submission,
        student,
        answers,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
}
