//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub assessment_type: String,
    pub term: i32,
    pub academic_year: String,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    #[sea_orm(column_type = "Double")]
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub assessed_on: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use super::{parse_date, timestamp_to_datetime};
        use crate::models::grades::entities::{AssessmentType, Grade};

        Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            assessment_type: self
                .assessment_type
                .parse::<AssessmentType>()
                .unwrap_or(AssessmentType::Test),
            term: self.term,
            academic_year: self.academic_year,
            score: self.score,
            max_score: self.max_score,
            comment: self.comment,
            assessed_on: parse_date(&self.assessed_on),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
