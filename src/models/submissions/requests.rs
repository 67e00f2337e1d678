use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建提交请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assessment_id: i64,
    pub content: Option<String>,
}

/// 单题作答
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AnswerPayload {
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub answer_text: Option<String>,
}

/// 批量作答请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerPayload>,
}

/// 单条人工批改
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradedAnswerPayload {
    pub answer_id: i64,
    pub points_earned: f64,
    pub feedback: Option<String>,
}

/// 人工批改请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeAnswersRequest {
    pub graded_answers: Vec<GradedAnswerPayload>,
    /// 整体评语，覆盖提交上的 feedback
    pub feedback: Option<String>,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub assessment_id: Option<i64>,
    pub student_id: Option<i64>,
    /// 筛选是否已批改：true=已批改，false=待批改，None=全部
    pub graded: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assessment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub graded: Option<bool>,
}

/// 存储层插入提交用的内部结构
///
/// 准入判定（can_submit、迟交、判零）在服务层完成，这里只承载结果。
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assessment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub is_late: bool,
    /// 迟交且考核不允许迟交时置真：grade=0、is_graded、固定评语。
    /// 准入检查已经拦截了这种情况，此分支为终态保护，不会失败。
    pub zero_grade: bool,
}
