use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub class_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

// 单条考勤记录；同一学生同一天重复提交会覆盖
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct RecordAttendanceRequest {
    pub student_id: i64,
    // 未提供时为当天
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct BulkAttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

// 按班级批量点名
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct BulkAttendanceRequest {
    pub class_id: i64,
    pub date: Option<NaiveDate>,
    pub records: Vec<BulkAttendanceEntry>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// 写入存储层的一条考勤
#[derive(Debug, Clone)]
pub struct AttendanceUpsert {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub recorded_by: Option<i64>,
}

// 考勤列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
    pub class_ids: Option<Vec<i64>>,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}
