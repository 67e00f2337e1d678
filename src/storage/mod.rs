use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段此时已是 argon2 哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数（用于初始化管理员）
    async fn count_users(&self) -> Result<u64>;

    /// 考核管理方法
    // 创建考核
    async fn create_assessment(
        &self,
        created_by: i64,
        assessment: CreateAssessmentRequest,
    ) -> Result<Assessment>;
    // 通过ID获取考核
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    // 列出考核（可用性由服务层按请求时刻计算）
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>>;
    // 更新考核
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    // 删除考核（存在提交时拒绝），同事务内级联删除题目/选项/标准答案
    async fn delete_assessment(&self, id: i64) -> Result<bool>;

    /// 题库管理方法
    // 创建题目
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<Question>;
    // 获取题目及其选项
    async fn get_question_with_options(
        &self,
        id: i64,
    ) -> Result<Option<(Question, Vec<QuestionOption>)>>;
    // 列出考核下的题目（按展示顺序）
    async fn list_questions_by_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<(Question, Vec<QuestionOption>)>>;
    // 为选择题添加选项
    async fn create_question_option(
        &self,
        question_id: i64,
        option: CreateOptionRequest,
    ) -> Result<QuestionOption>;
    // 设置标准答案；TF 题已有答案时拒绝第二条
    async fn set_canonical_answer(
        &self,
        question_id: i64,
        answer: SetCanonicalAnswerRequest,
    ) -> Result<CanonicalAnswer>;
    // 获取标准答案（按 ID 升序的第一条；TF 题由写入约束保证唯一）
    async fn get_canonical_answer(&self, question_id: i64) -> Result<Option<CanonicalAnswer>>;
    // 删除题目，同事务内级联删除选项/标准答案/关联作答
    async fn delete_question(&self, id: i64) -> Result<bool>;

    /// 提交与批改方法
    // 创建提交；(assessment, student) 唯一约束冲突返回 Conflict
    async fn create_submission(
        &self,
        submission: NewSubmission,
        now: DateTime<Utc>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 列出提交的全部作答
    async fn list_student_answers(&self, submission_id: i64) -> Result<Vec<StudentAnswer>>;
    // 列出提交（分页，附提交者信息）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 批量录入作答并即时判分客观题，更新提交的 auto_graded_score
    async fn submit_answers(
        &self,
        submission_id: i64,
        answers: Vec<AnswerPayload>,
    ) -> Result<(Vec<StudentAnswer>, f64)>;
    // 人工批改并全量重算最终成绩
    async fn grade_answers(
        &self,
        submission_id: i64,
        graded_answers: Vec<GradedAnswerPayload>,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Submission>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
