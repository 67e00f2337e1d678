//! 数据模型定义
//!
//! 业务实体、请求/响应结构与统一 API 返回码。

pub mod assessments;
pub mod auth;
pub mod common;
pub mod questions;
pub mod submissions;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务返回码
///
/// 与 HTTP 状态码正交：HTTP 表达传输层语义，code 表达业务层语义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,

    NotFound = 40400,
    UserNotFound = 40401,
    AssessmentNotFound = 40402,
    QuestionNotFound = 40403,
    SubmissionNotFound = 40404,
    AnswerNotFound = 40405,

    UserAlreadyExists = 40900,
    DuplicateSubmission = 40901,
    DuplicateCanonicalAnswer = 40902,
    AssessmentHasSubmissions = 40903,

    ValidationError = 42200,
    NotSubmittable = 42201,
    AnswerSubmissionMismatch = 42202,

    RateLimitExceeded = 42900,

    InternalServerError = 50000,
}

/// 应用启动时间，用于计算启动耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
