use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, check_references};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value) in [("first_name", &data.first_name), ("last_name", &data.last_name)] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value, 64)
        {
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

    match storage.update_student(id, data).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error("Student update failed", e)),
    }
}
