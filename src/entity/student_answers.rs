//! 学生作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
    pub points_earned: Option<f64>,
    pub is_correct: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(
        belongs_to = "super::question_options::Entity",
        from = "Column::SelectedOptionId",
        to = "super::question_options::Column::Id"
    )]
    SelectedOption,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::question_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SelectedOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_answer(self) -> crate::models::submissions::entities::StudentAnswer {
        crate::models::submissions::entities::StudentAnswer {
            id: self.id,
            submission_id: self.submission_id,
            question_id: self.question_id,
            selected_option_id: self.selected_option_id,
            answer_text: self.answer_text,
            points_earned: self.points_earned,
            is_correct: self.is_correct,
            feedback: self.feedback,
        }
    }
}
