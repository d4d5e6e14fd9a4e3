use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, validate_range};
use crate::models::attendance::{
    requests::AttendanceSummaryParams, responses::AttendanceSummary,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::can_view_student;
use crate::services::common::{bad_request, current_user, forbidden, not_found, storage_error};

pub async fn attendance_summary(
    service: &AttendanceService,
    student_id: i64,
    params: AttendanceSummaryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if let Err(msg) = validate_range(params.from, params.to) {
        return Ok(bad_request(ErrorCode::AttendanceInvalid, msg));
    }
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    };
    match can_view_student(&storage, &user, &student).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(forbidden(
                ErrorCode::AttendancePermissionDenied,
                "You do not have access to this student's attendance",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to check access", e)),
    }

    match storage
        .list_student_attendance(student.id, params.from, params.to)
        .await
    {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSummary::from_records(student.id, params.from, params.to, &records),
            "Attendance summary generated",
        ))),
        Err(e) => Ok(storage_error("Failed to load attendance", e)),
    }
}
