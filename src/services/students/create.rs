use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, check_references};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::CreateStudentRequest, responses::StudentResponse},
};
use crate::services::common::{bad_request, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn create_student(
    service: &StudentService,
    mut data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value, max_len) in [
        ("student_number", &data.student_number, 32),
        ("first_name", &data.first_name, 64),
        ("last_name", &data.last_name, 64),
    ] {
        if let Err(msg) = validate_required(field, value, max_len) {
            return Ok(bad_request(ErrorCode::StudentInvalid, msg));
        }
    }
    data.guardian_name = trimmed(data.guardian_name);
    data.guardian_phone = trimmed(data.guardian_phone);
    data.address = trimmed(data.address);

    let storage = service.get_storage(request);
    if let Err(response) =
        check_references(&storage, data.class_id, data.user_id, data.parent_user_id).await
    {
        return Ok(response);
    }

    match storage.create_student(data).await {
        Ok(student) => {
            info!("Student {} enrolled", student.student_number);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse { student },
                "Student created successfully",
            )))
        }
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StudentAlreadyExists, "Student number already exists"),
        )),
        Err(e) => Ok(storage_error("Student creation failed", e)),
    }
}
