//! 校历事件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub event_type: String,
    pub start_date: String,
    pub end_date: String,
    pub all_day: bool,
    pub term: Option<i32>,
    pub academic_year: Option<String>,
    pub source: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::SchoolEvent {
        use super::{parse_date, timestamp_to_datetime};
        use crate::models::events::entities::{EventSource, EventType, SchoolEvent};

        SchoolEvent {
            id: self.id,
            title: self.title,
            description: self.description,
            event_type: self
                .event_type
                .parse::<EventType>()
                .unwrap_or(EventType::Other),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            all_day: self.all_day,
            term: self.term,
            academic_year: self.academic_year,
            source: self
                .source
                .parse::<EventSource>()
                .unwrap_or(EventSource::Manual),
            created_by: self.created_by,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
