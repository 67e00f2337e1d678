use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::MLSystemError;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut req: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 入参校验
    if let Err(msg) = validate_username(&req.username) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&req.email) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 存储层接收哈希后的密码
    req.password = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    match storage.create_user(req).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user, "创建成功"))),
        Err(MLSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建用户失败: {e}"),
            )),
        ),
    }
}
