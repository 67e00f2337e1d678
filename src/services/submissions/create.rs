use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::MLSystemError;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{CreateSubmissionRequest, NewSubmission};
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(resp) = require_capability(&current_user, Capability::SubmitAssessments) {
        return Ok(*resp);
    }

    let assessment = match storage.get_assessment_by_id(req.assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "考核不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考核失败: {e}"),
                )),
            );
        }
    };

    let now = chrono::Utc::now();

    // 准入检查：未审批、未开放或窗口已过且不允许迟交时拒绝
    if !assessment.can_submit(now) {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::NotSubmittable,
            "考核当前不接受提交",
        )));
    }

    // 迟交标记：窗口已过但考核允许迟交
    let is_late = assessment.is_expired(now);

    let submission = NewSubmission {
        assessment_id: assessment.id,
        student_id: current_user.id,
        content: req.content,
        is_late,
        zero_grade: is_late && !assessment.allow_late_submission,
    };

    match storage.create_submission(submission, now).await {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted assessment {} (late: {})",
                current_user.id,
                assessment.id,
                is_late
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        // 唯一约束：每个学生对每个考核只有一条提交
        Err(MLSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DuplicateSubmission, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建提交失败: {e}"),
            )),
        ),
    }
}
