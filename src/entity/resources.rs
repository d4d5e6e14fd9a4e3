//! 教学资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub category: String,
    pub url: String,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub visibility: String,
    pub uploaded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_resource(self) -> crate::models::resources::entities::DocumentResource {
        use super::timestamp_to_datetime;
        use crate::models::resources::entities::{
            DocumentResource, ResourceCategory, ResourceVisibility,
        };

        DocumentResource {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self
                .category
                .parse::<ResourceCategory>()
                .unwrap_or(ResourceCategory::Other),
            url: self.url,
            class_id: self.class_id,
            subject_id: self.subject_id,
            // 无法识别时按最严格的可见性处理
            visibility: self
                .visibility
                .parse::<ResourceVisibility>()
                .unwrap_or(ResourceVisibility::Staff),
            uploaded_by: self.uploaded_by,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
