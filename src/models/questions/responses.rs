use serde::Serialize;
use ts_rs::TS;

use crate::models::questions::entities::{CanonicalAnswer, Question};

/// 对学生隐藏正确性标记的选项视图
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionOptionView {
    pub id: i64,
    pub option_text: String,
    /// 仅出题人/批改人可见；学生视角为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    pub sort_order: i32,
}

/// 题目详情（含选项；标准答案仅出题人视角携带）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_answer: Option<CanonicalAnswer>,
}

/// 考核题目列表响应（按展示顺序）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<QuestionDetail>,
}
