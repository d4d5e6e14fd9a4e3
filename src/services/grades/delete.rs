use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, ensure_can_edit};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_error};

pub async fn delete_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Ok(storage_error("Failed to load grade", e)),
    };
    if let Err(response) = ensure_can_edit(&storage, &user, &grade).await {
        return Ok(response);
    }

    match storage.delete_grade(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error("Grade deletion failed", e)),
    }
}
