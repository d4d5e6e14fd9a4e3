use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AttendanceService;
use crate::models::attendance::{
    requests::{AttendanceUpsert, RecordAttendanceRequest},
    responses::AttendanceResponse,
};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::access::teaches_class;
use crate::services::common::{current_user, forbidden, not_found, storage_error, trimmed};

pub async fn record_attendance(
    service: &AttendanceService,
    data: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(data.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    };

    let allowed = match student.class_id {
        Some(class_id) => match teaches_class(&storage, &user, class_id).await {
            Ok(allowed) => allowed,
            Err(e) => return Ok(storage_error("Failed to check access", e)),
        },
        None => user.role == UserRole::Admin,
    };
    if !allowed {
        return Ok(forbidden(
            ErrorCode::AttendancePermissionDenied,
            "Only administrators and the class's teachers can record attendance",
        ));
    }

    let record = AttendanceUpsert {
        student_id: student.id,
        class_id: student.class_id,
        date: data
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        status: data.status,
        note: trimmed(data.note),
        recorded_by: Some(user.id),
    };
    debug!(
        "Recording attendance {} for student {} on {}",
        record.status, record.student_id, record.date
    );

    match storage.upsert_attendance(record).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceResponse { record },
            "Attendance recorded",
        ))),
        Err(e) => Ok(storage_error("Failed to record attendance", e)),
    }
}
