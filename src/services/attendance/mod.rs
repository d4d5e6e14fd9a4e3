pub mod bulk;
pub mod list;
pub mod record;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryParams, BulkAttendanceRequest, RecordAttendanceRequest,
};

storage_service!(AttendanceService);

impl AttendanceService {
    pub async fn record_attendance(
        &self,
        data: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, data, request).await
    }

    // 按班级批量点名
    pub async fn record_bulk(
        &self,
        data: BulkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::record_bulk(self, data, request).await
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    pub async fn summary(
        &self,
        student_id: i64,
        query: AttendanceSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::attendance_summary(self, student_id, query, request).await
    }
}

/// 日期区间校验
pub(crate) fn validate_range(
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
) -> Result<(), &'static str> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err("'from' must not be after 'to'"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_range() {
        let a = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        assert!(validate_range(Some(a), Some(b)).is_ok());
        assert!(validate_range(Some(a), Some(a)).is_ok());
        assert!(validate_range(Some(b), Some(a)).is_err());
        assert!(validate_range(None, Some(a)).is_ok());
    }
}
