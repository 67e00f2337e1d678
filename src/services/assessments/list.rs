use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireJWT;
use crate::models::assessments::requests::AssessmentListQuery;
use crate::models::assessments::responses::{
    AssessmentAvailability, AssessmentListItem, AssessmentListResponse,
};
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
    mut query: AssessmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 学生只看到已审批的考核
    query.approved_only = !current_user
        .role
        .has_capability(Capability::ManageAssessments);

    let now = chrono::Utc::now();

    match storage.list_assessments_with_pagination(query).await {
        Ok(page) => {
            let items = page
                .items
                .into_iter()
                .map(|assessment| {
                    let availability = AssessmentAvailability {
                        is_available: assessment.is_available(now),
                        is_expired: assessment.is_expired(now),
                        can_submit: assessment.can_submit(now),
                    };
                    AssessmentListItem {
                        assessment,
                        availability,
                    }
                })
                .collect();

            let response = AssessmentListResponse {
                items,
                pagination: page.pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询考核列表失败: {e}"),
            )),
        ),
    }
}
