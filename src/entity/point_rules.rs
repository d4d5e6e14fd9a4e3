//! 积分规则实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "point_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub condition_type: String,
    #[sea_orm(column_type = "Double")]
    pub threshold: f64,
    pub window_days: i32,
    pub points: i32,
    pub category: String,
    pub active: bool,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::point_suggestions::Entity")]
    Suggestions,
}

impl Related<super::point_suggestions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suggestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 无法识别的条件类型返回 None，由调用方跳过
    pub fn into_rule(self) -> Option<crate::models::points::entities::PointRule> {
        use super::timestamp_to_datetime;
        use crate::models::points::entities::{PointCategory, PointRule, RuleCondition};

        let condition = self.condition_type.parse::<RuleCondition>().ok()?;
        Some(PointRule {
            id: self.id,
            name: self.name,
            description: self.description,
            condition,
            threshold: self.threshold,
            window_days: self.window_days,
            points: self.points,
            category: self
                .category
                .parse::<PointCategory>()
                .unwrap_or(PointCategory::Other),
            active: self.active,
            created_by: self.created_by,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        })
    }
}
