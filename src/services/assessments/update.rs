use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireJWT;
use crate::models::assessments::requests::UpdateAssessmentRequest;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;
use crate::utils::validate::validate_schedule_window;

pub async fn update_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    req: UpdateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(resp) = require_capability(&current_user, Capability::ManageAssessments) {
        return Ok(*resp);
    }

    // 审批开关需要单独的审批能力
    if req.is_approved.is_some()
        && let Err(resp) = require_capability(&current_user, Capability::ApproveAssessments)
    {
        return Ok(*resp);
    }

    let existing = match storage.get_assessment_by_id(assessment_id).await {
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

    // 用更新后的窗口整体校验，防止分两次请求写出倒置窗口
    let merged_start = req.scheduled_start.or(existing.scheduled_start);
    let merged_end = req.scheduled_end.or(existing.scheduled_end);
    if let Err(msg) = validate_schedule_window(merged_start, merged_end) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Some(points) = req.points
        && points <= 0.0
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "考核总分必须大于 0",
        )));
    }

    match storage.update_assessment(assessment_id, req).await {
        Ok(Some(assessment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "考核不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新考核失败: {e}"),
            )),
        ),
    }
}
