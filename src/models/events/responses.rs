use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{EventType, SchoolEvent};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct EventResponse {
    pub event: SchoolEvent,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct EventListResponse {
    pub items: Vec<SchoolEvent>,
    pub pagination: PaginationInfo,
}

/// 生成的校历条目（未持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct CalendarEntry {
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct CalendarPreviewResponse {
    pub year: i32,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct GenerateCalendarResponse {
    pub academic_year: String,
    pub created: Vec<SchoolEvent>,
    // 已存在（同标题同日期）而跳过的数量
    pub skipped: usize,
}

/// 学期及其日期范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct AcademicTerm {
    pub term: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AcademicTerm {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct TermGroup {
    #[serde(flatten)]
    #[ts(flatten)]
    pub term: AcademicTerm,
    pub name: String,
    pub events: Vec<SchoolEvent>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct TermsResponse {
    pub academic_year: String,
    pub terms: Vec<TermGroup>,
}
