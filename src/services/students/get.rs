use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::responses::StudentResponse};
use crate::services::access::can_view_student;
use crate::services::common::{current_user, forbidden, not_found, storage_error};

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to get student", e)),
    };

    match can_view_student(&storage, &user, &student).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student retrieved successfully",
        ))),
        Ok(false) => Ok(forbidden(
            ErrorCode::Forbidden,
            "You do not have access to this student",
        )),
        Err(e) => Ok(storage_error("Failed to check access", e)),
    }
}
