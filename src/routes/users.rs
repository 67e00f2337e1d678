use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCapability, RequireJWT};
use crate::models::users::entities::Capability;
use crate::models::users::requests::{
    CreateUserRequest, UpdateUserRequest, UserListParams, UserListQuery,
};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// 创建用户
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&req, body.into_inner()).await
}

// 获取用户详情
pub async fn get_user(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, id.0).await
}

// 列出用户
pub async fn list_users(
    req: HttpRequest,
    params: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    let params = params.into_inner();
    let query = UserListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        role: params.role,
        search: params.search,
    };
    USER_SERVICE.list_users(&req, query).await
}

// 更新用户
pub async fn update_user(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.update_user(&req, id.0, body.into_inner()).await
}

// 删除用户
pub async fn delete_user(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, id.0).await
}

// 配置路由（用户管理整段需要 ManageUsers 能力）
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(RequireCapability::new(Capability::ManageUsers))
            .wrap(RequireJWT)
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
