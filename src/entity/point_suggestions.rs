//! 积分建议实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "point_suggestions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub rule_id: i64,
    pub student_id: i64,
    pub points: i32,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: String,
    pub created_at: i64,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::point_rules::Entity",
        from = "Column::RuleId",
        to = "super::point_rules::Column::Id",
        on_delete = "Cascade"
    )]
    Rule,
}

impl Related<super::point_rules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_suggestion(self) -> crate::models::points::entities::PointSuggestion {
        use super::timestamp_to_datetime;
        use crate::models::points::entities::{PointSuggestion, SuggestionStatus};

        PointSuggestion {
            id: self.id,
            rule_id: self.rule_id,
            student_id: self.student_id,
            points: self.points,
            reason: self.reason,
            status: self
                .status
                .parse::<SuggestionStatus>()
                .unwrap_or(SuggestionStatus::Pending),
            created_at: timestamp_to_datetime(self.created_at),
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at.map(timestamp_to_datetime),
        }
    }
}
