use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::responses::EventResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_error};

pub async fn get_event(
    service: &EventService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_event_by_id(id).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventResponse { event },
            "Event retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_error("Failed to load event", e)),
    }
}
