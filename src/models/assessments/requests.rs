use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assessments::entities::AssessmentType;
use crate::models::common::pagination::PaginationQuery;

/// 创建考核请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub unit_id: i64,
    pub module_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub title: String,
    pub instructions: Option<String>,
    pub points: f64,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-03-01T12:00:00Z"
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub allow_late_submission: Option<bool>,
    pub show_answers_after_submission: Option<bool>,
}

/// 更新考核请求
///
/// is_approved 的变更需要审批能力，由服务层单独校验。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub points: Option<f64>,
    pub due_date: Option<DateTime<Utc>>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub allow_late_submission: Option<bool>,
    pub show_answers_after_submission: Option<bool>,
    pub is_approved: Option<bool>,
}

/// 考核列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unit_id: Option<i64>,
    pub module_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub unit_id: Option<i64>,
    pub module_id: Option<i64>,
    pub search: Option<String>,
    /// 学生视角只列出已审批的考核
    pub approved_only: bool,
}
