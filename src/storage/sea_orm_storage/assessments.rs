//! 考核存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::entity::question_options::{Column as OptionColumn, Entity as QuestionOptions};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{MLSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建考核（新建考核默认未审批）
    pub async fn create_assessment_impl(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            unit_id: Set(req.unit_id),
            module_id: Set(req.module_id),
            lesson_id: Set(req.lesson_id),
            assessment_type: Set(req.assessment_type.to_string()),
            title: Set(req.title),
            instructions: Set(req.instructions),
            points: Set(req.points),
            due_date: Set(req.due_date.timestamp()),
            scheduled_start: Set(req.scheduled_start.map(|dt| dt.timestamp())),
            scheduled_end: Set(req.scheduled_end.map(|dt| dt.timestamp())),
            duration_minutes: Set(req.duration_minutes),
            allow_late_submission: Set(req.allow_late_submission.unwrap_or(false)),
            is_approved: Set(false),
            show_answers_after_submission: Set(req.show_answers_after_submission.unwrap_or(false)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("创建考核失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取考核
    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询考核失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 分页列出考核
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assessments::find();

        // 单元/模块筛选
        if let Some(unit_id) = query.unit_id {
            select = select.filter(Column::UnitId.eq(unit_id));
        }
        if let Some(module_id) = query.module_id {
            select = select.filter(Column::ModuleId.eq(module_id));
        }

        // 学生视角只列出已审批的考核
        if query.approved_only {
            select = select.filter(Column::IsApproved.eq(true));
        }

        // 标题搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        // 排序：先按截止时间，再按 ID
        select = select
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询考核总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询考核页数失败: {e}")))?;

        let assessments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询考核列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: assessments
                .into_iter()
                .map(|m| m.into_assessment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考核
    pub async fn update_assessment_impl(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        let existing = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询考核失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }
        if let Some(points) = update.points {
            model.points = Set(points);
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(scheduled_start) = update.scheduled_start {
            model.scheduled_start = Set(Some(scheduled_start.timestamp()));
        }
        if let Some(scheduled_end) = update.scheduled_end {
            model.scheduled_end = Set(Some(scheduled_end.timestamp()));
        }
        if let Some(duration_minutes) = update.duration_minutes {
            model.duration_minutes = Set(Some(duration_minutes));
        }
        if let Some(allow_late_submission) = update.allow_late_submission {
            model.allow_late_submission = Set(allow_late_submission);
        }
        if let Some(show_answers) = update.show_answers_after_submission {
            model.show_answers_after_submission = Set(show_answers);
        }
        if let Some(is_approved) = update.is_approved {
            model.is_approved = Set(is_approved);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("更新考核失败: {e}")))?;

        Ok(Some(result.into_assessment()))
    }

    /// 考核的提交数
    pub async fn count_submissions_for_assessment_impl(&self, assessment_id: i64) -> Result<u64> {
        Submissions::find()
            .filter(SubmissionColumn::AssessmentId.eq(assessment_id))
            .count(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("统计提交数失败: {e}")))
    }

    /// 删除考核
    ///
    /// 存在提交的考核只被引用、不删除；题目/选项/标准答案
    /// 在同一事务内同步删除，不留孤儿引用。
    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let submission_count = self.count_submissions_for_assessment_impl(id).await?;
        if submission_count > 0 {
            return Err(MLSystemError::conflict(format!(
                "考核 {id} 已有 {submission_count} 条提交，不可删除"
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        // 收集题目 ID，删除其选项与标准答案
        let question_ids: Vec<i64> = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(id))
            .select_only()
            .column(QuestionColumn::Id)
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询题目失败: {e}")))?;

        if !question_ids.is_empty() {
            QuestionOptions::delete_many()
                .filter(OptionColumn::QuestionId.is_in(question_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("删除选项失败: {e}")))?;

            Answers::delete_many()
                .filter(AnswerColumn::QuestionId.is_in(question_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    MLSystemError::database_operation(format!("删除标准答案失败: {e}"))
                })?;

            Questions::delete_many()
                .filter(QuestionColumn::AssessmentId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("删除题目失败: {e}")))?;
        }

        let result = Assessments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("删除考核失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
