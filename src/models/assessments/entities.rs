use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考核类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentType {
    /// 平时测验（Continuous Assessment Test）
    #[serde(rename = "CAT")]
    Cat,
    Test,
    Assignment,
    LabTask,
    LessonAssessment,
}

impl AssessmentType {
    pub const CAT: &'static str = "CAT";
    pub const TEST: &'static str = "Test";
    pub const ASSIGNMENT: &'static str = "Assignment";
    pub const LAB_TASK: &'static str = "LabTask";
    pub const LESSON_ASSESSMENT: &'static str = "LessonAssessment";
}

impl<'de> Deserialize<'de> for AssessmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考核类型: '{s}'. 支持: CAT, Test, Assignment, LabTask, LessonAssessment"
            ))
        })
    }
}

impl std::fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentType::Cat => write!(f, "{}", AssessmentType::CAT),
            AssessmentType::Test => write!(f, "{}", AssessmentType::TEST),
            AssessmentType::Assignment => write!(f, "{}", AssessmentType::ASSIGNMENT),
            AssessmentType::LabTask => write!(f, "{}", AssessmentType::LAB_TASK),
            AssessmentType::LessonAssessment => write!(f, "{}", AssessmentType::LESSON_ASSESSMENT),
        }
    }
}

impl std::str::FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AssessmentType::CAT => Ok(AssessmentType::Cat),
            AssessmentType::TEST => Ok(AssessmentType::Test),
            AssessmentType::ASSIGNMENT => Ok(AssessmentType::Assignment),
            AssessmentType::LAB_TASK => Ok(AssessmentType::LabTask),
            AssessmentType::LESSON_ASSESSMENT => Ok(AssessmentType::LessonAssessment),
            _ => Err(format!("Invalid assessment type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    // 唯一 ID
    pub id: i64,
    // 所属单元 ID（课程结构为外部引用数据）
    pub unit_id: i64,
    pub module_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub title: String,
    pub instructions: Option<String>,
    // 考核总分
    pub points: f64,
    // 截止时间
    pub due_date: DateTime<Utc>,
    // 开放窗口（可选）
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    // 限时（分钟，可选）
    pub duration_minutes: Option<i32>,
    // 是否允许迟交
    pub allow_late_submission: bool,
    // 是否已审批发布
    pub is_approved: bool,
    // 提交后是否向学生展示答案
    pub show_answers_after_submission: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 可用性判定
///
/// 三个谓词均为纯函数，时钟由调用方传入。
/// “可见”（is_available）与“可交”（can_submit）是两个概念，
/// 仅在允许迟交的过期窗口上分叉：此时 is_expired 为真而 can_submit 仍可为真。
impl Assessment {
    /// 已审批，且开放时间未设置或已到
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.is_approved && self.scheduled_start.is_none_or(|start| now >= start)
    }

    /// 结束时间已设置且已过
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_end.is_some_and(|end| now > end)
    }

    /// 当前时刻是否接受提交
    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        if !self.is_approved {
            return false;
        }
        if let Some(start) = self.scheduled_start
            && now < start
        {
            return false;
        }
        // 窗口已过时由迟交开关决定
        match self.scheduled_end {
            Some(end) if now > end => self.allow_late_submission,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assessment(
        is_approved: bool,
        scheduled_start: Option<DateTime<Utc>>,
        scheduled_end: Option<DateTime<Utc>>,
        allow_late_submission: bool,
    ) -> Assessment {
        let now = Utc::now();
        Assessment {
            id: 1,
            unit_id: 1,
            module_id: None,
            lesson_id: None,
            assessment_type: AssessmentType::Cat,
            title: "Networking CAT 1".to_string(),
            instructions: None,
            points: 20.0,
            due_date: now + Duration::days(7),
            scheduled_start,
            scheduled_end,
            duration_minutes: None,
            allow_late_submission,
            is_approved,
            show_answers_after_submission: false,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_start_availability_equals_approval() {
        let now = Utc::now();
        // 无开放时间时 is_available 与 is_approved 一致
        assert!(assessment(true, None, None, false).is_available(now));
        assert!(!assessment(false, None, None, false).is_available(now));
    }

    #[test]
    fn test_not_available_before_start() {
        let now = Utc::now();
        let a = assessment(true, Some(now + Duration::hours(1)), None, false);
        assert!(!a.is_available(now));
        assert!(!a.can_submit(now));
        assert!(a.is_available(now + Duration::hours(2)));
    }

    #[test]
    fn test_expired_window_blocks_submission_without_late_allowance() {
        let now = Utc::now();
        let a = assessment(true, None, Some(now - Duration::days(1)), false);
        // 仍可见，但不可交
        assert!(a.is_available(now));
        assert!(a.is_expired(now));
        assert!(!a.can_submit(now));
    }

    #[test]
    fn test_expired_window_allows_late_submission_when_flagged() {
        let now = Utc::now();
        let a = assessment(true, None, Some(now - Duration::days(1)), true);
        assert!(a.is_expired(now));
        assert!(a.can_submit(now));
    }

    #[test]
    fn test_open_window_accepts_submissions() {
        let now = Utc::now();
        let a = assessment(
            true,
            Some(now - Duration::hours(1)),
            Some(now + Duration::hours(1)),
            false,
        );
        assert!(a.is_available(now));
        assert!(!a.is_expired(now));
        assert!(a.can_submit(now));
    }

    #[test]
    fn test_unapproved_never_submittable() {
        let now = Utc::now();
        let a = assessment(false, None, None, true);
        assert!(!a.can_submit(now));
    }
}
