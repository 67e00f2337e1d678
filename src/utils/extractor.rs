//! 路径参数安全提取器
//!
//! 路径中的数字 ID 解析失败时返回统一的 400 响应，而不是 actix 默认错误页。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 为指定路径参数名生成一个 i64 提取器类型
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                futures_util::future::ready($crate::utils::extractor::parse_path_i64(req, $param).map($name))
            }
        }
    };
}

pub fn parse_path_i64(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    match req.match_info().get(param).map(str::parse::<i64>) {
        Some(Ok(value)) if value > 0 => Ok(value),
        _ => Err(actix_web::error::InternalError::from_response(
            format!("invalid path parameter: {param}"),
            actix_web::HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("路径参数 {param} 必须为正整数"),
            )),
        )
        .into()),
    }
}

/// 通用 `{id}` 提取器
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_path_i64(req, "id").map(SafeIDI64))
    }
}

define_safe_i64_extractor!(SafeAssessmentIdI64, "assessment_id");
define_safe_i64_extractor!(SafeQuestionIdI64, "question_id");
define_safe_i64_extractor!(SafeSubmissionIdI64, "submission_id");
