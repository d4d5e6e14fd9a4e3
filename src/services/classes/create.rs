use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, check_references, normalize_ids, validate_capacity};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{requests::CreateClassRequest, responses::ClassResponse},
};
use crate::services::common::{bad_request, storage_error, trimmed};
use crate::utils::validate::{validate_academic_year, validate_required};

pub async fn create_class(
    service: &ClassService,
    mut data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("name", &data.name, 64)
        .and_then(|_| validate_required("grade_level", &data.grade_level, 32))
    {
        return Ok(bad_request(ErrorCode::ClassInvalid, msg));
    }
    data.academic_year = data.academic_year.trim().to_string();
    if let Err(msg) = validate_academic_year(&data.academic_year) {
        return Ok(bad_request(ErrorCode::ClassInvalid, msg));
    }
    if let Err(response) = validate_capacity(data.capacity) {
        return Ok(response);
    }
    data.section = trimmed(data.section);
    data.room = trimmed(data.room);
    normalize_ids(&mut data.teacher_ids);
    normalize_ids(&mut data.subject_ids);

    let storage = service.get_storage(request);
    if let Err(response) = check_references(&storage, &data.teacher_ids, &data.subject_ids).await {
        return Ok(response);
    }

    match storage.create_class(data).await {
        Ok(class) => {
            info!("Class {} created", class.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassResponse {
                    class,
                    student_count: 0,
                },
                "Class created successfully",
            )))
        }
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassAlreadyExists, "Class name already exists"),
        )),
        Err(e) => Ok(storage_error("Class creation failed", e)),
    }
}
