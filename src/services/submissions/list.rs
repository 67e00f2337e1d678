use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::users::entities::Capability;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    mut query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 学生只能列出自己的提交
    if !current_user
        .role
        .has_capability(Capability::GradeSubmissions)
    {
        query.student_id = Some(current_user.id);
    }

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}
