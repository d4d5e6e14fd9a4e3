use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_references, normalize_ids, validate_capacity};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{requests::UpdateClassRequest, responses::ClassResponse},
};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::validate::{validate_academic_year, validate_required};

pub async fn update_class(
    service: &ClassService,
    class_id: i64,
    mut data: UpdateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value, max_len) in [
        ("name", &data.name, 64),
        ("grade_level", &data.grade_level, 32),
    ] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value, max_len)
        {
            return Ok(bad_request(ErrorCode::ClassInvalid, msg));
        }
    }
    if let Some(ref year) = data.academic_year
        && let Err(msg) = validate_academic_year(year.trim())
    {
        return Ok(bad_request(ErrorCode::ClassInvalid, msg));
    }
    if let Err(response) = validate_capacity(data.capacity) {
        return Ok(response);
    }
    data.academic_year = data.academic_year.map(|y| y.trim().to_string());
    data.section = trimmed(data.section);
    data.room = trimmed(data.room);
    if let Some(ref mut ids) = data.teacher_ids {
        normalize_ids(ids);
    }
    if let Some(ref mut ids) = data.subject_ids {
        normalize_ids(ids);
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_references(
        &storage,
        data.teacher_ids.as_deref().unwrap_or_default(),
        data.subject_ids.as_deref().unwrap_or_default(),
    )
    .await
    {
        return Ok(response);
    }

    let class = match storage.update_class(class_id, data).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(SchoolHubError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                "Class name already exists",
            )));
        }
        Err(e) => return Ok(storage_error("Class update failed", e)),
    };

    match storage.count_students(Some(class.id)).await {
        Ok(student_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassResponse {
                class,
                student_count,
            },
            "Class updated successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to count students", e)),
    }
}
