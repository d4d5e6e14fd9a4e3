use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    pub enum EventType("event.ts") {
        Holiday => "holiday",
        Exam => "exam",
        Meeting => "meeting",
        Cultural => "cultural",
        Term => "term",
        Sports => "sports",
        Other => "other",
    }
}

string_enum! {
    pub enum EventSource("event.ts") {
        Manual => "manual",
        Generated => "generated",
    }
}

// 校历事件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "event.ts")]
pub struct SchoolEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub all_day: bool,
    // 由开始月份推导，8月不属于任何学期
    pub term: Option<i32>,
    pub academic_year: Option<String>,
    pub source: EventSource,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 月份所属学期：9-12 月为第一学期，1-4 月为第二学期，5-7 月为第三学期
pub fn term_for_month(month: u32) -> Option<i32> {
    match month {
        9..=12 => Some(1),
        1..=4 => Some(2),
        5..=7 => Some(3),
        _ => None,
    }
}

/// 学年起始年份；9 月起算新学年
pub fn academic_year_start_for(date: NaiveDate) -> i32 {
    if date.month() >= 9 {
        date.year()
    } else {
        date.year() - 1
    }
}

pub fn academic_year_label(start_year: i32) -> String {
    format!("{}/{}", start_year, start_year + 1)
}

/// 解析 "2024/2025" 形式的学年
pub fn parse_academic_year(label: &str) -> Option<i32> {
    let (start, end) = label.trim().split_once('/')?;
    let start: i32 = start.parse().ok()?;
    let end: i32 = end.parse().ok()?;
    (Some(end) == start.checked_add(1)).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_academic_year() {
        assert_eq!(parse_academic_year("2024/2025"), Some(2024));
        assert_eq!(parse_academic_year("2024/2026"), None);
        assert_eq!(parse_academic_year("2147483647/0"), None);
    }

    #[test]
    fn test_term_for_month() {
        assert_eq!(term_for_month(9), Some(1));
        assert_eq!(term_for_month(12), Some(1));
        assert_eq!(term_for_month(1), Some(2));
        assert_eq!(term_for_month(4), Some(2));
        assert_eq!(term_for_month(5), Some(3));
        assert_eq!(term_for_month(7), Some(3));
        assert_eq!(term_for_month(8), None);
    }

    #[test]
    fn test_academic_year() {
        let d = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(academic_year_start_for(d), 2024);
        let d = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(academic_year_start_for(d), 2024);
        assert_eq!(academic_year_label(2024), "2024/2025");
        assert_eq!(parse_academic_year("2024/2025"), Some(2024));
        assert_eq!(parse_academic_year("2024/2026"), None);
        assert_eq!(parse_academic_year("2024"), None);
    }
}
