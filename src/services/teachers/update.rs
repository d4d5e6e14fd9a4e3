use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, check_references};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::UpdateTeacherRequest, responses::TeacherResponse},
};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    mut data: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value) in [("first_name", &data.first_name), ("last_name", &data.last_name)] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value, 64)
        {
            return Ok(bad_request(ErrorCode::TeacherInvalid, msg));
        }
    }
    data.email = trimmed(data.email).map(|e| e.to_lowercase());
    data.phone = trimmed(data.phone);
    data.qualification = trimmed(data.qualification);
    if let Some(ref mut ids) = data.subject_ids {
        ids.sort_unstable();
        ids.dedup();
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_references(
        &storage,
        data.user_id,
        data.email.as_deref(),
        data.subject_ids.as_deref().unwrap_or_default(),
    )
    .await
    {
        return Ok(response);
    }

    match storage.update_teacher(id, data).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherResponse { teacher },
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TeacherAlreadyExists, "Linked account already in use"),
        )),
        Err(e) => Ok(storage_error("Teacher update failed", e)),
    }
}
