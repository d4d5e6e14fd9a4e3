use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::EventType;
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct EventListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub term: Option<i32>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: NaiveDate,
    // 未提供时与开始日期相同
    pub end_date: Option<NaiveDate>,
    pub all_day: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub all_day: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct CalendarPreviewParams {
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct GenerateCalendarRequest {
    pub academic_year_start: i32,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct TermsParams {
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub academic_year_start: Option<i32>,
}

// 写入存储层的事件
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub all_day: bool,
    pub source: super::entities::EventSource,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    pub term: Option<i32>,
    pub academic_year: Option<String>,
}
