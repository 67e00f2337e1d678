//! 标准答案实体
//!
//! 非选择题的标准答案：SHORT/ESSAY/FILL 存参考文本，TF 存布尔真值。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
    pub is_correct_for_tf: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_canonical_answer(self) -> crate::models::questions::entities::CanonicalAnswer {
        crate::models::questions::entities::CanonicalAnswer {
            id: self.id,
            question_id: self.question_id,
            answer_text: self.answer_text,
            is_correct_for_tf: self.is_correct_for_tf,
        }
    }
}
