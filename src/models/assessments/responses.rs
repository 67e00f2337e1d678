use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::assessments::entities::Assessment;

/// 创建者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentCreator {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 按请求时刻计算出的可用性
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentAvailability {
    pub is_available: bool,
    pub is_expired: bool,
    pub can_submit: bool,
}

/// 考核详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assessment: Assessment,
    pub availability: AssessmentAvailability,
    pub creator: Option<AssessmentCreator>,
}

/// 考核列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assessment: Assessment,
    pub availability: AssessmentAvailability,
}

/// 考核列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentListItem>,
    pub pagination: PaginationInfo,
}
