//! 题库存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers,
};
use crate::entity::question_options::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOptions,
};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::entity::student_answers::{
    Column as StudentAnswerColumn, Entity as StudentAnswers,
};
use crate::errors::{MLSystemError, Result};
use crate::models::questions::{
    entities::{CanonicalAnswer, Question, QuestionOption, QuestionType},
    requests::{CreateOptionRequest, CreateQuestionRequest, SetCanonicalAnswerRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(&self, req: CreateQuestionRequest) -> Result<Question> {
        let model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            question_text: Set(req.question_text),
            question_type: Set(req.question_type.to_string()),
            points: Set(req.points.unwrap_or(1.0)),
            sort_order: Set(req.sort_order.unwrap_or(1)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 获取题目及其选项
    pub async fn get_question_with_options_impl(
        &self,
        id: i64,
    ) -> Result<Option<(Question, Vec<QuestionOption>)>> {
        let Some(question) = self.get_question_by_id_impl(id).await? else {
            return Ok(None);
        };

        let options = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.eq(id))
            .order_by_asc(OptionColumn::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询选项失败: {e}")))?;

        Ok(Some((
            question,
            options.into_iter().map(|m| m.into_option()).collect(),
        )))
    }

    /// 列出考核下的题目（按展示顺序，批量取选项）
    pub async fn list_questions_by_assessment_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<(Question, Vec<QuestionOption>)>> {
        let questions = Questions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询题目列表失败: {e}")))?;

        if questions.is_empty() {
            return Ok(vec![]);
        }

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let options = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.is_in(question_ids))
            .order_by_asc(OptionColumn::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询选项失败: {e}")))?;

        let mut option_map: HashMap<i64, Vec<QuestionOption>> = HashMap::new();
        for option in options {
            option_map
                .entry(option.question_id)
                .or_default()
                .push(option.into_option());
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let options = option_map.remove(&q.id).unwrap_or_default();
                (q.into_question(), options)
            })
            .collect())
    }

    /// 为选择题添加选项
    pub async fn create_question_option_impl(
        &self,
        question_id: i64,
        req: CreateOptionRequest,
    ) -> Result<QuestionOption> {
        let question = self
            .get_question_by_id_impl(question_id)
            .await?
            .ok_or_else(|| MLSystemError::not_found(format!("题目不存在: {question_id}")))?;

        if question.question_type != QuestionType::Mcq {
            return Err(MLSystemError::validation(format!(
                "题目 {question_id} 不是选择题，不能添加选项"
            )));
        }

        let model = OptionActiveModel {
            question_id: Set(question_id),
            option_text: Set(req.option_text),
            is_correct: Set(req.is_correct),
            sort_order: Set(req.sort_order.unwrap_or(1)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("创建选项失败: {e}")))?;

        Ok(result.into_option())
    }

    /// 设置标准答案
    ///
    /// TF 题每题一条标准答案：在事务内检查后写入，已有答案时返回 Conflict。
    pub async fn set_canonical_answer_impl(
        &self,
        question_id: i64,
        req: SetCanonicalAnswerRequest,
    ) -> Result<CanonicalAnswer> {
        let question = self
            .get_question_by_id_impl(question_id)
            .await?
            .ok_or_else(|| MLSystemError::not_found(format!("题目不存在: {question_id}")))?;

        if question.question_type == QuestionType::Tf && req.is_correct_for_tf.is_none() {
            return Err(MLSystemError::validation(
                "判断题的标准答案必须提供 is_correct_for_tf",
            ));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        if question.question_type == QuestionType::Tf {
            let existing = Answers::find()
                .filter(AnswerColumn::QuestionId.eq(question_id))
                .count(&txn)
                .await
                .map_err(|e| {
                    MLSystemError::database_operation(format!("查询标准答案失败: {e}"))
                })?;

            if existing > 0 {
                return Err(MLSystemError::conflict(format!(
                    "判断题 {question_id} 已有标准答案"
                )));
            }
        }

        let model = AnswerActiveModel {
            question_id: Set(question_id),
            answer_text: Set(req.answer_text),
            is_correct_for_tf: Set(req.is_correct_for_tf),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("创建标准答案失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_canonical_answer())
    }

    /// 获取标准答案（ID 升序第一条；TF 题由写入约束保证唯一）
    pub async fn get_canonical_answer_impl(
        &self,
        question_id: i64,
    ) -> Result<Option<CanonicalAnswer>> {
        let result = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_asc(AnswerColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("查询标准答案失败: {e}")))?;

        Ok(result.map(|m| m.into_canonical_answer()))
    }

    /// 删除题目
    ///
    /// 同事务内同步删除选项、标准答案与关联作答记录，不留孤儿引用。
    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        StudentAnswers::delete_many()
            .filter(StudentAnswerColumn::QuestionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("删除作答记录失败: {e}")))?;

        QuestionOptions::delete_many()
            .filter(OptionColumn::QuestionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("删除选项失败: {e}")))?;

        Answers::delete_many()
            .filter(AnswerColumn::QuestionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("删除标准答案失败: {e}")))?;

        let result = Questions::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| MLSystemError::database_operation(format!("删除题目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
