use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireJWT;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_capability;
use crate::utils::validate::validate_schedule_window;

pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    req: CreateAssessmentRequest,
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

    if req.points <= 0.0 {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "考核总分必须大于 0",
        )));
    }

    // 开放窗口必须正序
    if let Err(msg) = validate_schedule_window(req.scheduled_start, req.scheduled_end) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    match storage.create_assessment(current_user.id, req).await {
        Ok(assessment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建考核失败: {e}"),
            )),
        ),
    }
}
