use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    /// 最终成绩（人工批改汇总后）
    pub grade: Option<f64>,
    /// 作答录入时客观题自动判分的累计得分
    pub auto_graded_score: Option<f64>,
    pub feedback: Option<String>,
    pub is_graded: bool,
    pub is_late: bool,
    pub is_zero_graded: bool,
    pub submitted_at: DateTime<Utc>,
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct StudentAnswer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub answer_text: Option<String>,
    pub points_earned: Option<f64>,
    /// 自动判分结论；主观题为 None
    pub is_correct: Option<bool>,
    pub feedback: Option<String>,
}

/// 最终成绩 = 该提交下全部作答的 points_earned 之和
///
/// 全量重算而非增量累加，重复调用结果一致；未判分的作答按 0 计。
pub fn aggregate_grade(answers: &[StudentAnswer]) -> f64 {
    answers
        .iter()
        .map(|answer| answer.points_earned.unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(id: i64, points_earned: Option<f64>) -> StudentAnswer {
        StudentAnswer {
            id,
            submission_id: 1,
            question_id: id,
            selected_option_id: None,
            answer_text: None,
            points_earned,
            is_correct: None,
            feedback: None,
        }
    }

    #[test]
    fn test_aggregate_sums_auto_and_manual_points() {
        // 自动判分 10 分，人工补判 5 + 7 分
        let answers = [
            answer(1, Some(10.0)),
            answer(2, Some(5.0)),
            answer(3, Some(7.0)),
        ];
        assert_eq!(aggregate_grade(&answers), 22.0);
    }

    #[test]
    fn test_aggregate_treats_ungraded_as_zero() {
        let answers = [answer(1, Some(10.0)), answer(2, None)];
        assert_eq!(aggregate_grade(&answers), 10.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let answers = [answer(1, Some(3.5)), answer(2, Some(4.0))];
        let first = aggregate_grade(&answers);
        let second = aggregate_grade(&answers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        assert_eq!(aggregate_grade(&[]), 0.0);
    }
}
