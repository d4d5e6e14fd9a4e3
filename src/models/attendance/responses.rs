use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceResponse {
    pub record: AttendanceRecord,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct BulkAttendanceResponse {
    pub date: NaiveDate,
    pub recorded: usize,
    pub items: Vec<AttendanceRecord>,
}

/// 考勤汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub student_id: i64,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub excused: u32,
    // 出勤率（百分比），请假不计入分母；没有可统计记录时为 None
    pub attendance_rate: Option<f64>,
}

impl AttendanceSummary {
    pub fn from_records(
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        records: &[AttendanceRecord],
    ) -> Self {
        let mut summary = Self {
            student_id,
            from,
            to,
            ..Default::default()
        };
        for record in records {
            summary.total += 1;
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        summary.attendance_rate = attendance_rate(
            summary.present + summary.late,
            summary.total - summary.excused,
        );
        summary
    }
}

pub fn attendance_rate(attended: u32, countable: u32) -> Option<f64> {
    if countable == 0 {
        None
    } else {
        Some((attended as f64 / countable as f64 * 10000.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: day as i64,
            student_id: 3,
            class_id: Some(1),
            date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            status,
            note: None,
            recorded_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_excludes_excused_from_rate() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Late),
            record(3, AttendanceStatus::Absent),
            record(4, AttendanceStatus::Excused),
        ];
        let summary = AttendanceSummary::from_records(3, None, None, &records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.excused, 1);
        assert_eq!(summary.attendance_rate, Some(66.67));
    }

    #[test]
    fn test_summary_without_countable_records() {
        let summary =
            AttendanceSummary::from_records(3, None, None, &[record(1, AttendanceStatus::Excused)]);
        assert_eq!(summary.attendance_rate, None);

        let empty = AttendanceSummary::from_records(3, None, None, &[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.attendance_rate, None);
    }
}
