use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_error};

pub async fn delete_event(
    service: &EventService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_event(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_error("Event deletion failed", e)),
    }
}
