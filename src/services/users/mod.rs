pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建用户
    pub async fn create_user(
        &self,
        request: &HttpRequest,
        req: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, request, req).await
    }

    /// 获取用户详情
    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    /// 列出用户
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    /// 更新用户
    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        req: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, req).await
    }

    /// 删除用户
    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}
