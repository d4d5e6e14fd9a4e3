//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳以 Unix 秒存储，日期以 `YYYY-MM-DD` 字符串存储，ID 列表以 JSON 文本存储。

pub mod prelude;

pub mod attendance;
pub mod classes;
pub mod events;
pub mod grades;
pub mod messages;
pub mod point_rules;
pub mod point_suggestions;
pub mod point_transactions;
pub mod resources;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or_default()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_id_list(value: &str) -> Vec<i64> {
    serde_json::from_str(value).unwrap_or_default()
}

pub(crate) fn format_id_list(ids: &[i64]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_round_trip_and_fallback() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 26).unwrap();
        assert_eq!(format_date(date), "2025-07-26");
        assert_eq!(parse_date("2025-07-26"), date);
        assert_eq!(parse_date("not a date"), NaiveDate::default());
    }

    #[test]
    fn test_id_list_parsing() {
        assert_eq!(parse_id_list("[1,2,3]"), vec![1, 2, 3]);
        assert_eq!(parse_id_list(""), Vec::<i64>::new());
        assert_eq!(format_id_list(&[4, 5]), "[4,5]");
    }
}
