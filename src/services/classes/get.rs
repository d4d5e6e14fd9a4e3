use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassResponse};
use crate::services::common::{not_found, storage_error};

pub async fn get_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(storage_error("Failed to get class", e)),
    };

    match storage.count_students(Some(class.id)).await {
        Ok(student_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassResponse {
                class,
                student_count,
            },
            "Class retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to count students", e)),
    }
}
