use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireJWT;
use crate::models::assessments::responses::{
    AssessmentAvailability, AssessmentCreator, AssessmentDetail,
};
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let assessment = match storage.get_assessment_by_id(assessment_id).await {
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

    // 学生只能看到已开放的考核；出题方可以看到全部
    if !current_user.role.has_capability(Capability::ManageAssessments)
        && !assessment.is_available(now)
    {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "考核不存在",
        )));
    }

    // 创建者信息缺失不影响详情返回
    let creator = match storage.get_user_by_id(assessment.created_by).await {
        Ok(Some(user)) => Some(AssessmentCreator {
            id: user.id,
            username: user.username,
            profile_name: user.profile_name,
        }),
        _ => None,
    };

    let availability = AssessmentAvailability {
        is_available: assessment.is_available(now),
        is_expired: assessment.is_expired(now),
        can_submit: assessment.can_submit(now),
    };

    let detail = AssessmentDetail {
        assessment,
        availability,
        creator,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
}
