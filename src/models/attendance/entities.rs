use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    pub enum AttendanceStatus("attendance.ts") {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

impl AttendanceStatus {
    /// 到校（出勤或迟到）
    pub fn is_attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

// 考勤记录，每个学生每天一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    // 记录人（User.id）
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
