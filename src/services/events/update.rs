use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EventService, MAX_TITLE_LENGTH, validate_dates};
use crate::models::events::{requests::UpdateEventRequest, responses::EventResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn update_event(
    service: &EventService,
    id: i64,
    mut data: UpdateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_event_by_id(id).await {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => return Ok(storage_error("Failed to load event", e)),
    };

    if let Some(ref title) = data.title {
        let title = title.trim().to_string();
        if let Err(msg) = validate_required("title", &title, MAX_TITLE_LENGTH) {
            return Ok(bad_request(ErrorCode::EventInvalid, msg));
        }
        data.title = Some(title);
    }
    // 日期按合并后的值校验
    let start = data.start_date.unwrap_or(existing.start_date);
    let end = data.end_date.unwrap_or(existing.end_date);
    if let Err(msg) = validate_dates(start, end) {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }
    if data.description.is_some() {
        data.description = Some(trimmed(data.description).unwrap_or_default());
    }

    match storage.update_event(id, data).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventResponse { event },
            "Event updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_error("Event update failed", e)),
    }
}
