pub mod assessments;
pub mod auth;
pub mod questions;
pub mod submissions;
pub mod users;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use questions::QuestionService;
pub use submissions::SubmissionService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::models::users::entities::{Capability, User};
use crate::models::{ApiResponse, ErrorCode};

/// 服务层的能力校验：角色能力集不包含所需能力时返回 403 响应
pub(crate) fn require_capability(
    user: &User,
    capability: Capability,
) -> Result<(), Box<HttpResponse>> {
    if user.role.has_capability(capability) {
        Ok(())
    } else {
        Err(Box::new(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(
                ErrorCode::Forbidden,
                format!("当前角色没有 {capability:?} 权限"),
            ),
        )))
    }
}
