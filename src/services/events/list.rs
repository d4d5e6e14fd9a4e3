use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EventService, validate_dates};
use crate::models::events::{
    entities::parse_academic_year,
    requests::{EventListParams, EventListQuery},
};
use crate::models::{ApiResponse, ErrorCode, grades::entities::validate_term};
use crate::services::common::{bad_request, storage_error, trimmed};

pub async fn list_events(
    service: &EventService,
    params: EventListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(from), Some(to)) = (params.from, params.to)
        && let Err(msg) = validate_dates(from, to)
    {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }
    if let Some(term) = params.term
        && let Err(msg) = validate_term(term)
    {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }
    let academic_year = trimmed(params.academic_year);
    if let Some(ref year) = academic_year
        && parse_academic_year(year).is_none()
    {
        return Ok(bad_request(
            ErrorCode::EventInvalid,
            "Academic year must look like 2024/2025",
        ));
    }

    let (page, size) = params.pagination.normalized();
    let query = EventListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        from: params.from,
        to: params.to,
        event_type: params.event_type,
        term: params.term,
        academic_year,
    };

    match service
        .get_storage(request)
        .list_events_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Event list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve events", e)),
    }
}
