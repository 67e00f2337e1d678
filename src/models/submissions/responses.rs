use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::submissions::entities::{StudentAnswer, Submission};

/// 提交者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionStudent {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 提交详情（含作答）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: Option<SubmissionStudent>,
    pub answers: Vec<StudentAnswer>,
}

/// 批量作答响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitAnswersResponse {
    pub answers: Vec<StudentAnswer>,
    pub auto_graded_score: f64,
}

/// 提交列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: Option<SubmissionStudent>,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
