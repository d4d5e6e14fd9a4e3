//! 积分流水实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "point_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub points: i32,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub category: String,
    pub awarded_by: Option<i64>,
    pub rule_id: Option<i64>,
    pub suggestion_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_transaction(self) -> crate::models::points::entities::PointTransaction {
        use super::timestamp_to_datetime;
        use crate::models::points::entities::{PointCategory, PointTransaction};

        PointTransaction {
            id: self.id,
            student_id: self.student_id,
            points: self.points,
            reason: self.reason,
            category: self
                .category
                .parse::<PointCategory>()
                .unwrap_or(PointCategory::Other),
            awarded_by: self.awarded_by,
            rule_id: self.rule_id,
            suggestion_id: self.suggestion_id,
            created_at: timestamp_to_datetime(self.created_at),
        }
    }
}
