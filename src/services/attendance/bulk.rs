use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::{
    requests::{AttendanceUpsert, BulkAttendanceRequest},
    responses::BulkAttendanceResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::teaches_class;
use crate::services::common::{
    bad_request, current_user, forbidden, not_found, storage_error, trimmed,
};

pub async fn record_bulk(
    service: &AttendanceService,
    data: BulkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if data.records.is_empty() {
        return Ok(bad_request(
            ErrorCode::AttendanceInvalid,
            "At least one attendance record is required",
        ));
    }
    let storage = service.get_storage(request);

    match storage.get_class_by_id(data.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(storage_error("Failed to load class", e)),
    }
    match teaches_class(&storage, &user, data.class_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(forbidden(
                ErrorCode::AttendancePermissionDenied,
                "Only administrators and the class's teachers can record attendance",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to check access", e)),
    }

    // 所有学生都必须属于该班级
    let roster: HashSet<i64> = match storage.list_students_by_class(data.class_id).await {
        Ok(students) => students.into_iter().map(|s| s.id).collect(),
        Err(e) => return Ok(storage_error("Failed to load class roster", e)),
    };
    let mut seen = HashSet::new();
    for entry in &data.records {
        if !roster.contains(&entry.student_id) {
            return Ok(bad_request(
                ErrorCode::AttendanceInvalid,
                format!(
                    "Student {} is not enrolled in class {}",
                    entry.student_id, data.class_id
                ),
            ));
        }
        if !seen.insert(entry.student_id) {
            return Ok(bad_request(
                ErrorCode::AttendanceInvalid,
                format!("Student {} appears more than once", entry.student_id),
            ));
        }
    }

    let date = data
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let records = data
        .records
        .into_iter()
        .map(|entry| AttendanceUpsert {
            student_id: entry.student_id,
            class_id: Some(data.class_id),
            date,
            status: entry.status,
            note: trimmed(entry.note),
            recorded_by: Some(user.id),
        })
        .collect();

    match storage.upsert_attendance_batch(records).await {
        Ok(items) => {
            info!(
                "Recorded {} attendance entries for class {} on {}",
                items.len(),
                data.class_id,
                date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkAttendanceResponse {
                    date,
                    recorded: items.len(),
                    items,
                },
                "Attendance recorded",
            )))
        }
        Err(e) => Ok(storage_error("Failed to record attendance", e)),
    }
}
