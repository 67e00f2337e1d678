use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    /// 单选题
    Mcq,
    /// 判断题
    Tf,
    /// 简答题
    Short,
    /// 论述题
    Essay,
    /// 填空题
    Fill,
}

impl QuestionType {
    pub const MCQ: &'static str = "MCQ";
    pub const TF: &'static str = "TF";
    pub const SHORT: &'static str = "SHORT";
    pub const ESSAY: &'static str = "ESSAY";
    pub const FILL: &'static str = "FILL";

    /// 客观题在作答录入时即时判分，主观题等待人工批改
    pub fn is_auto_gradable(&self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::Tf)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持: MCQ, TF, SHORT, ESSAY, FILL"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Mcq => write!(f, "{}", QuestionType::MCQ),
            QuestionType::Tf => write!(f, "{}", QuestionType::TF),
            QuestionType::Short => write!(f, "{}", QuestionType::SHORT),
            QuestionType::Essay => write!(f, "{}", QuestionType::ESSAY),
            QuestionType::Fill => write!(f, "{}", QuestionType::FILL),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            QuestionType::MCQ => Ok(QuestionType::Mcq),
            QuestionType::TF => Ok(QuestionType::Tf),
            QuestionType::SHORT => Ok(QuestionType::Short),
            QuestionType::ESSAY => Ok(QuestionType::Essay),
            QuestionType::FILL => Ok(QuestionType::Fill),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub assessment_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: f64,
    // 展示顺序
    pub sort_order: i32,
}

/// 选择题选项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub option_text: String,
    pub is_correct: bool,
    pub sort_order: i32,
}

/// 标准答案
///
/// SHORT/ESSAY/FILL 用 answer_text 作为参考答案，TF 用 is_correct_for_tf。
/// TF 题每题至多一条标准答案，由存储层在写入时拒绝第二条。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CanonicalAnswer {
    pub id: i64,
    pub question_id: i64,
    pub answer_text: Option<String>,
    pub is_correct_for_tf: Option<bool>,
}

/// 自动判分结果
///
/// 主观题两个字段均为 None，等待人工批改。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoGradeVerdict {
    pub is_correct: Option<bool>,
    pub points_earned: Option<f64>,
}

impl AutoGradeVerdict {
    const UNGRADED: AutoGradeVerdict = AutoGradeVerdict {
        is_correct: None,
        points_earned: None,
    };

    fn scored(correct: bool, full_points: f64) -> Self {
        AutoGradeVerdict {
            is_correct: Some(correct),
            points_earned: Some(if correct { full_points } else { 0.0 }),
        }
    }
}

impl Question {
    /// 作答录入时的即时判分
    ///
    /// - MCQ：以所选选项自身的 is_correct 标记为准；
    /// - TF：作答文本（忽略大小写）为 "true" 与标准答案比对，
    ///   没有标准答案时不判分；
    /// - 其余类型不自动判分。
    pub fn auto_grade(
        &self,
        selected_option: Option<&QuestionOption>,
        canonical: Option<&CanonicalAnswer>,
        answer_text: Option<&str>,
    ) -> AutoGradeVerdict {
        match self.question_type {
            QuestionType::Mcq => match selected_option {
                Some(option) => AutoGradeVerdict::scored(option.is_correct, self.points),
                None => AutoGradeVerdict::UNGRADED,
            },
            QuestionType::Tf => {
                match canonical.and_then(|answer| answer.is_correct_for_tf) {
                    Some(expected) => {
                        let answered_true = answer_text
                            .map(|text| text.to_lowercase() == "true")
                            .unwrap_or(false);
                        AutoGradeVerdict::scored(answered_true == expected, self.points)
                    }
                    None => AutoGradeVerdict::UNGRADED,
                }
            }
            _ => AutoGradeVerdict::UNGRADED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(question_type: QuestionType, points: f64) -> Question {
        Question {
            id: 1,
            assessment_id: 1,
            question_text: "What does TCP stand for?".to_string(),
            question_type,
            points,
            sort_order: 1,
        }
    }

    fn option(is_correct: bool) -> QuestionOption {
        QuestionOption {
            id: 10,
            question_id: 1,
            option_text: "Transmission Control Protocol".to_string(),
            is_correct,
            sort_order: 1,
        }
    }

    fn tf_answer(expected: bool) -> CanonicalAnswer {
        CanonicalAnswer {
            id: 20,
            question_id: 1,
            answer_text: None,
            is_correct_for_tf: Some(expected),
        }
    }

    #[test]
    fn test_mcq_correct_option_earns_full_points() {
        let verdict = question(QuestionType::Mcq, 10.0).auto_grade(Some(&option(true)), None, None);
        assert_eq!(verdict.is_correct, Some(true));
        assert_eq!(verdict.points_earned, Some(10.0));
    }

    #[test]
    fn test_mcq_wrong_option_earns_zero() {
        let verdict =
            question(QuestionType::Mcq, 10.0).auto_grade(Some(&option(false)), None, None);
        assert_eq!(verdict.is_correct, Some(false));
        assert_eq!(verdict.points_earned, Some(0.0));
    }

    #[test]
    fn test_mcq_without_selection_stays_ungraded() {
        let verdict = question(QuestionType::Mcq, 10.0).auto_grade(None, None, None);
        assert_eq!(verdict.is_correct, None);
        assert_eq!(verdict.points_earned, None);
    }

    #[test]
    fn test_tf_matches_case_insensitively() {
        let q = question(QuestionType::Tf, 5.0);
        let verdict = q.auto_grade(None, Some(&tf_answer(true)), Some("True"));
        assert_eq!(verdict.is_correct, Some(true));
        assert_eq!(verdict.points_earned, Some(5.0));

        let verdict = q.auto_grade(None, Some(&tf_answer(true)), Some("TRUE"));
        assert_eq!(verdict.is_correct, Some(true));
    }

    #[test]
    fn test_tf_mismatch_earns_zero() {
        let q = question(QuestionType::Tf, 5.0);
        let verdict = q.auto_grade(None, Some(&tf_answer(false)), Some("true"));
        assert_eq!(verdict.is_correct, Some(false));
        assert_eq!(verdict.points_earned, Some(0.0));
    }

    #[test]
    fn test_tf_without_canonical_answer_stays_ungraded() {
        let q = question(QuestionType::Tf, 5.0);
        let verdict = q.auto_grade(None, None, Some("true"));
        assert_eq!(verdict.is_correct, None);
        assert_eq!(verdict.points_earned, None);
    }

    #[test]
    fn test_subjective_types_never_auto_grade() {
        for question_type in [QuestionType::Short, QuestionType::Essay, QuestionType::Fill] {
            let verdict = question(question_type, 8.0).auto_grade(None, None, Some("anything"));
            assert_eq!(verdict.is_correct, None);
            assert_eq!(verdict.points_earned, None);
        }
    }
}
