use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, MAX_TITLE_LENGTH, validate_dates};
use crate::models::events::{
    entities::EventSource,
    requests::{CreateEventRequest, NewEvent},
    responses::EventResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn create_event(
    service: &EventService,
    data: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let title = data.title.trim().to_string();
    let end_date = data.end_date.unwrap_or(data.start_date);
    if let Err(msg) = validate_required("title", &title, MAX_TITLE_LENGTH)
        .and(validate_dates(data.start_date, end_date))
    {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }

    let event = NewEvent {
        title,
        description: trimmed(data.description),
        event_type: data.event_type,
        start_date: data.start_date,
        end_date,
        all_day: data.all_day.unwrap_or(true),
        source: EventSource::Manual,
        created_by: Some(user.id),
    };

    match service.get_storage(request).create_event(event).await {
        Ok(event) => {
            info!("Event {} ({}) created by {}", event.id, event.title, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                EventResponse { event },
                "Event created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Event creation failed", e)),
    }
}
