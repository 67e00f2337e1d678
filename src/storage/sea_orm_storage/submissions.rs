//! 提交与批改存储操作
//!
//! 准入策略（can_submit、迟交判定）在服务层完成；这里负责
//! 需要原子性的部分：唯一约束插入、作答录入判分事务、成绩重算事务。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::question_options::{Column as OptionColumn, Entity as QuestionOptions};
use crate::entity::questions::Entity as Questions;
use crate::entity::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Column as StudentAnswerColumn,
    Entity as StudentAnswers,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{MLSystemError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{StudentAnswer, Submission, aggregate_grade},
        requests::{AnswerPayload, GradedAnswerPayload, NewSubmission, SubmissionListQuery},
        responses::{SubmissionListItem, SubmissionListResponse, SubmissionStudent},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 迟交判零时写入的固定评语
const LATE_ZERO_FEEDBACK: &str = "Late submission – automatically graded zero.";

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// (assessment_id, student_id) 上的唯一索引保证每个学生对每个考核
    /// 至多一条提交；并发重复提交由约束冲突拒绝，映射为 Conflict。
    pub async fn create_submission_impl(
        &self,
        submission: NewSubmission,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let mut model = ActiveModel {
            assessment_id: Set(submission.assessment_id),
            student_id: Set(submission.student_id),
            content: Set(submission.content),
            is_late: Set(submission.is_late),
            submitted_at: Set(now.timestamp()),
            ..Default::default()
        };

        // 迟交且不允许迟交时的终态：判零并标记已批改。
        // 服务层的准入检查已经拦截了这条路径，保留此分支作为保护。
        if submission.zero_grade {
            model.grade = Set(Some(0.0));
            model.is_graded = Set(true);
            model.is_zero_graded = Set(true);
            model.feedback = Set(Some(LATE_ZERO_FEEDBACK.to_string()));
        }

        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                MLSystemError::conflict(format!(
                    "学生 {} 已提交过考核 {}",
                    submission.student_id, submission.assessment_id
                ))
            } else {
                MLSystemError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出提交的全部作答
    pub async fn list_student_answers_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<StudentAnswer>> {
        let results = StudentAnswers::find()
            .filter(StudentAnswerColumn::SubmissionId.eq(submission_id))
            .order_by_asc(StudentAnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_student_answer()).collect())
    }

    /// 列出提交（分页）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 考核筛选
        if let Some(assessment_id) = query.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 批改状态筛选
        if let Some(graded) = query.graded {
            select = select.filter(Column::IsGraded.eq(graded));
        }

        // 排序
        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询提交者信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询用户信息失败: {e}")))?;

        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        let items = submissions
            .into_iter()
            .map(|s| {
                let student = user_map.get(&s.student_id).map(|u| SubmissionStudent {
                    id: u.id,
                    username: u.username.clone(),
                    profile_name: u.profile_name.clone(),
                });
                SubmissionListItem {
                    submission: s.into_submission(),
                    student,
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 在事务内取标准答案（ID 升序第一条）
    async fn get_canonical_answer_in_txn(
        txn: &DatabaseTransaction,
        question_id: i64,
    ) -> Result<Option<crate::models::questions::entities::CanonicalAnswer>> {
        use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};

        let result = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_asc(AnswerColumn::Id)
            .one(txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询标准答案失败: {e}")))?;

        Ok(result.map(|m| m.into_canonical_answer()))
    }

    /// 批量录入作答并即时判分
    ///
    /// 整个录入在一个事务内完成：任何一个 question_id 不存在都使
    /// 整批失败回滚，不会静默跳过。客观题（MCQ/TF）按题目分值判分，
    /// 累计结果写入提交的 auto_graded_score。
    pub async fn submit_answers_impl(
        &self,
        submission_id: i64,
        answers: Vec<AnswerPayload>,
    ) -> Result<(Vec<StudentAnswer>, f64)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| MLSystemError::not_found(format!("提交不存在: {submission_id}")))?;

        let mut created_answers = Vec::with_capacity(answers.len());
        let mut auto_graded_total = 0.0;

        for payload in answers {
            let question = Questions::find_by_id(payload.question_id)
                .one(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("查询题目失败: {e}")))?
                .ok_or_else(|| {
                    MLSystemError::not_found(format!("题目不存在: {}", payload.question_id))
                })?
                .into_question();

            // 所选选项必须属于该题目
            let selected_option = match payload.selected_option_id {
                Some(option_id) => Some(
                    QuestionOptions::find_by_id(option_id)
                        .filter(OptionColumn::QuestionId.eq(question.id))
                        .one(&txn)
                        .await
                        .map_err(|e| {
                            MLSystemError::database_operation(format!("查询选项失败: {e}"))
                        })?
                        .ok_or_else(|| {
                            MLSystemError::not_found(format!(
                                "选项 {option_id} 不存在或不属于题目 {}",
                                question.id
                            ))
                        })?
                        .into_option(),
                ),
                None => None,
            };

            let canonical = if question.question_type
                == crate::models::questions::entities::QuestionType::Tf
            {
                Self::get_canonical_answer_in_txn(&txn, question.id).await?
            } else {
                None
            };

            let verdict = question.auto_grade(
                selected_option.as_ref(),
                canonical.as_ref(),
                payload.answer_text.as_deref(),
            );

            if let Some(points) = verdict.points_earned {
                auto_graded_total += points;
            }

            let model = StudentAnswerActiveModel {
                submission_id: Set(submission_id),
                question_id: Set(question.id),
                selected_option_id: Set(payload.selected_option_id),
                answer_text: Set(payload.answer_text),
                points_earned: Set(verdict.points_earned),
                is_correct: Set(verdict.is_correct),
                ..Default::default()
            };

            let created = model
                .insert(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("创建作答失败: {e}")))?;

            created_answers.push(created.into_student_answer());
        }

        // 累计客观题得分写回提交
        let mut submission_model: ActiveModel = submission.into();
        submission_model.auto_graded_score = Set(Some(auto_graded_total));
        submission_model
            .update(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("更新自动判分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((created_answers, auto_graded_total))
    }

    /// 人工批改并重算最终成绩
    ///
    /// 成绩是该提交下全部作答 points_earned 的总和（含已自动判分的
    /// 客观题），全量重算，重复调用得到相同结果。批改目标不属于该
    /// 提交时整批拒绝。
    pub async fn grade_answers_impl(
        &self,
        submission_id: i64,
        graded_answers: Vec<GradedAnswerPayload>,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| MLSystemError::not_found(format!("提交不存在: {submission_id}")))?;

        for edit in graded_answers {
            let answer = StudentAnswers::find_by_id(edit.answer_id)
                .one(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("查询作答失败: {e}")))?
                .ok_or_else(|| {
                    MLSystemError::not_found(format!("作答记录不存在: {}", edit.answer_id))
                })?;

            if answer.submission_id != submission_id {
                return Err(MLSystemError::validation(format!(
                    "作答 {} 不属于提交 {submission_id}",
                    edit.answer_id
                )));
            }

            let mut model: StudentAnswerActiveModel = answer.into();
            model.points_earned = Set(Some(edit.points_earned));
            if let Some(answer_feedback) = edit.feedback {
                model.feedback = Set(Some(answer_feedback));
            }
            model
                .update(&txn)
                .await
                .map_err(|e| MLSystemError::database_operation(format!("更新作答失败: {e}")))?;
        }

        // 全量重算：汇总该提交下所有作答的得分
        let all_answers: Vec<StudentAnswer> = StudentAnswers::find()
            .filter(StudentAnswerColumn::SubmissionId.eq(submission_id))
            .all(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询作答失败: {e}")))?
            .into_iter()
            .map(|m| m.into_student_answer())
            .collect();

        let final_grade = aggregate_grade(&all_answers);

        let mut submission_model: ActiveModel = submission.into();
        submission_model.grade = Set(Some(final_grade));
        submission_model.is_graded = Set(true);
        if let Some(feedback) = feedback {
            submission_model.feedback = Set(Some(feedback));
        }
        submission_model.graded_at = Set(Some(now.timestamp()));

        let updated = submission_model
            .update(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("更新成绩失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_submission())
    }
}
