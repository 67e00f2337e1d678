//! 考核实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub unit_id: i64,
    pub module_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub assessment_type: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub points: f64,
    pub due_date: i64,
    pub scheduled_start: Option<i64>,
    pub scheduled_end: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub allow_late_submission: bool,
    pub is_approved: bool,
    pub show_answers_after_submission: bool,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentType};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        Assessment {
            id: self.id,
            unit_id: self.unit_id,
            module_id: self.module_id,
            lesson_id: self.lesson_id,
            assessment_type: AssessmentType::from_str(&self.assessment_type)
                .unwrap_or(AssessmentType::Assignment),
            title: self.title,
            instructions: self.instructions,
            points: self.points,
            due_date: DateTime::<Utc>::from_timestamp(self.due_date, 0).unwrap_or_default(),
            scheduled_start: self
                .scheduled_start
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            scheduled_end: self
                .scheduled_end
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            duration_minutes: self.duration_minutes,
            allow_late_submission: self.allow_late_submission,
            is_approved: self.is_approved,
            show_answers_after_submission: self.show_answers_after_submission,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
