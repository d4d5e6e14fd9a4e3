use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_error};

pub async fn delete_teacher(
    service: &TeacherService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_teacher(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_error("Teacher deletion failed", e)),
    }
}
