use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,        // 系统管理员
    CourseMaster, // 课程负责人
    Hod,          // 系主任
    Trainer,      // 讲师
    Student,      // 学生
}

/// 操作能力
///
/// 每个端点声明所需能力，由角色到能力集的静态映射决定放行，
/// 不做基于角色类层次的动态分派。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum Capability {
    ManageUsers,
    ManageAssessments,
    ApproveAssessments,
    AuthorQuestions,
    ViewAssessments,
    SubmitAssessments,
    GradeSubmissions,
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const COURSE_MASTER: &'static str = "course_master";
    pub const HOD: &'static str = "hod";
    pub const TRAINER: &'static str = "trainer";
    pub const STUDENT: &'static str = "student";

    /// 角色对应的能力集
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            UserRole::Admin => &[
                ManageUsers,
                ManageAssessments,
                ApproveAssessments,
                AuthorQuestions,
                ViewAssessments,
                SubmitAssessments,
                GradeSubmissions,
            ],
            UserRole::CourseMaster | UserRole::Hod => &[
                ManageAssessments,
                ApproveAssessments,
                AuthorQuestions,
                ViewAssessments,
                GradeSubmissions,
            ],
            UserRole::Trainer => &[
                ManageAssessments,
                AuthorQuestions,
                ViewAssessments,
                GradeSubmissions,
            ],
            UserRole::Student => &[ViewAssessments, SubmitAssessments],
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::COURSE_MASTER => Ok(UserRole::CourseMaster),
            UserRole::HOD => Ok(UserRole::Hod),
            UserRole::TRAINER => Ok(UserRole::Trainer),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, course_master, hod, trainer, student"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::CourseMaster => write!(f, "{}", UserRole::COURSE_MASTER),
            UserRole::Hod => write!(f, "{}", UserRole::HOD),
            UserRole::Trainer => write!(f, "{}", UserRole::TRAINER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "course_master" => Ok(UserRole::CourseMaster),
            "hod" => Ok(UserRole::Hod),
            "trainer" => Ok(UserRole::Trainer),
            "student" => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
            .map_err(|e| format!("生成 access token 失败: {e}"))
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_capabilities() {
        assert!(UserRole::Student.has_capability(Capability::SubmitAssessments));
        assert!(UserRole::Student.has_capability(Capability::ViewAssessments));
        assert!(!UserRole::Student.has_capability(Capability::GradeSubmissions));
        assert!(!UserRole::Student.has_capability(Capability::ManageUsers));
    }

    #[test]
    fn test_trainer_cannot_approve() {
        assert!(UserRole::Trainer.has_capability(Capability::ManageAssessments));
        assert!(UserRole::Trainer.has_capability(Capability::GradeSubmissions));
        assert!(!UserRole::Trainer.has_capability(Capability::ApproveAssessments));
    }

    #[test]
    fn test_hod_and_course_master_approve() {
        assert!(UserRole::Hod.has_capability(Capability::ApproveAssessments));
        assert!(UserRole::CourseMaster.has_capability(Capability::ApproveAssessments));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::CourseMaster,
            UserRole::Hod,
            UserRole::Trainer,
            UserRole::Student,
        ] {
            let parsed: UserRole = role.to_string().parse().expect("role should parse");
            assert_eq!(parsed, role);
        }
    }
}
