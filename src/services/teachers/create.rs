use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, check_references};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::CreateTeacherRequest, responses::TeacherResponse},
};
use crate::services::common::{bad_request, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn create_teacher(
    service: &TeacherService,
    mut data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value, max_len) in [
        ("employee_number", &data.employee_number, 32),
        ("first_name", &data.first_name, 64),
        ("last_name", &data.last_name, 64),
    ] {
        if let Err(msg) = validate_required(field, value, max_len) {
            return Ok(bad_request(ErrorCode::TeacherInvalid, msg));
        }
    }
    data.email = trimmed(data.email).map(|e| e.to_lowercase());
    data.phone = trimmed(data.phone);
    data.qualification = trimmed(data.qualification);
    data.subject_ids.sort_unstable();
    data.subject_ids.dedup();

    let storage = service.get_storage(request);
    if let Err(response) =
        check_references(&storage, data.user_id, data.email.as_deref(), &data.subject_ids).await
    {
        return Ok(response);
    }

    match storage.create_teacher(data).await {
        Ok(teacher) => Ok(HttpResponse::Created().json(ApiResponse::success(
            TeacherResponse { teacher },
            "Teacher created successfully",
        ))),
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::TeacherAlreadyExists,
                "Employee number or linked account already in use",
            ),
        )),
        Err(e) => Ok(storage_error("Teacher creation failed", e)),
    }
}
