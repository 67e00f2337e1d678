/*!
 * 基于能力集的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用。端点声明所需能力，
 * 用户角色映射到静态能力集（见 `UserRole::capabilities`），
 * 每个请求只做一次集合成员判断，不依赖角色类层次的动态分派。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use crate::middlewares::{RequireJWT, RequireCapability};
 * use crate::models::users::entities::Capability;
 *
 * web::scope("/api/v1/users")
 *     .wrap(RequireCapability::new(Capability::ManageUsers))
 *     .wrap(RequireJWT)
 *     .route("", web::post().to(create_user_handler))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{Capability, User},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireCapability {
    required: Capability,
}

impl RequireCapability {
    pub fn new(capability: Capability) -> Self {
        Self {
            required: capability,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCapability
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCapabilityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCapabilityMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RequireCapabilityMiddleware<S> {
    service: Rc<S>,
    required: Capability,
}

impl<S, B> Service<ServiceRequest> for RequireCapabilityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required;

        Box::pin(async move {
            // 从请求扩展中获取用户信息（由 RequireJWT 写入）
            let user = req.extensions().get::<User>().cloned();

            match user {
                Some(user) => {
                    if user.role.has_capability(required) {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {}). Required capability: {:?}",
                            user.id, user.role, required
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Capability check failed: No user claims found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
