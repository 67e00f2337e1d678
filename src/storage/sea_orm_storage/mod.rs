//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod questions;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{MLSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| MLSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| MLSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| MLSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(MLSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use chrono::{DateTime, Utc};

use crate::models::{
    PaginatedResponse,
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
    questions::{
        entities::{CanonicalAnswer, Question, QuestionOption},
        requests::{CreateOptionRequest, CreateQuestionRequest, SetCanonicalAnswerRequest},
    },
    submissions::{
        entities::{StudentAnswer, Submission},
        requests::{AnswerPayload, GradedAnswerPayload, NewSubmission, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 考核模块
    async fn create_assessment(
        &self,
        created_by: i64,
        assessment: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        self.create_assessment_impl(created_by, assessment).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>> {
        self.list_assessments_with_pagination_impl(query).await
    }

    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, update).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        self.delete_assessment_impl(id).await
    }

    // 题库模块
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<Question> {
        self.create_question_impl(question).await
    }

    async fn get_question_with_options(
        &self,
        id: i64,
    ) -> Result<Option<(Question, Vec<QuestionOption>)>> {
        self.get_question_with_options_impl(id).await
    }

    async fn list_questions_by_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<(Question, Vec<QuestionOption>)>> {
        self.list_questions_by_assessment_impl(assessment_id).await
    }

    async fn create_question_option(
        &self,
        question_id: i64,
        option: CreateOptionRequest,
    ) -> Result<QuestionOption> {
        self.create_question_option_impl(question_id, option).await
    }

    async fn set_canonical_answer(
        &self,
        question_id: i64,
        answer: SetCanonicalAnswerRequest,
    ) -> Result<CanonicalAnswer> {
        self.set_canonical_answer_impl(question_id, answer).await
    }

    async fn get_canonical_answer(&self, question_id: i64) -> Result<Option<CanonicalAnswer>> {
        self.get_canonical_answer_impl(question_id).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    // 提交与批改模块
    async fn create_submission(
        &self,
        submission: NewSubmission,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        self.create_submission_impl(submission, now).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_student_answers(&self, submission_id: i64) -> Result<Vec<StudentAnswer>> {
        self.list_student_answers_impl(submission_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn submit_answers(
        &self,
        submission_id: i64,
        answers: Vec<AnswerPayload>,
    ) -> Result<(Vec<StudentAnswer>, f64)> {
        self.submit_answers_impl(submission_id, answers).await
    }

    async fn grade_answers(
        &self,
        submission_id: i64,
        graded_answers: Vec<GradedAnswerPayload>,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        self.grade_answers_impl(submission_id, graded_answers, feedback, now)
            .await
    }
}
