use serde::Deserialize;
use ts_rs::TS;

use crate::models::questions::entities::QuestionType;

/// 创建题目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub assessment_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: Option<f64>,
    pub sort_order: Option<i32>,
}

/// 创建选择题选项请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateOptionRequest {
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
    pub sort_order: Option<i32>,
}

/// 设置标准答案请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct SetCanonicalAnswerRequest {
    pub answer_text: Option<String>,
    pub is_correct_for_tf: Option<bool>,
}
