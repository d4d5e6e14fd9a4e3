use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use tracing::info;

use super::EventService;
use super::calendar::{
    academic_year_entries, calendar_for_year, validate_academic_year_start, validate_year,
};
use crate::models::events::{
    entities::{EventSource, academic_year_label},
    requests::{CalendarPreviewParams, GenerateCalendarRequest, NewEvent},
    responses::{CalendarPreviewResponse, GenerateCalendarResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, storage_error};

pub async fn preview_calendar(params: CalendarPreviewParams) -> ActixResult<HttpResponse> {
    let year = params
        .year
        .unwrap_or_else(|| chrono::Local::now().date_naive().year());
    if let Err(msg) = validate_year(year) {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }

    let entries = calendar_for_year(year).as_ref().clone();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CalendarPreviewResponse { year, entries },
        "Calendar preview generated",
    )))
}

/// 生成学年校历并落库，同标题同日期的事件跳过
pub async fn generate_calendar(
    service: &EventService,
    data: GenerateCalendarRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let start = data.academic_year_start;
    if let Err(msg) = validate_academic_year_start(start) {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }

    let events = academic_year_entries(start)
        .into_iter()
        .map(|entry| NewEvent {
            title: entry.title,
            description: Some(entry.description),
            event_type: entry.event_type,
            start_date: entry.date,
            end_date: entry.date,
            all_day: true,
            source: EventSource::Generated,
            created_by: Some(user.id),
        })
        .collect();

    let academic_year = academic_year_label(start);
    match service
        .get_storage(request)
        .create_events_if_absent(events)
        .await
    {
        Ok((created, skipped)) => {
            info!(
                "Generated calendar {}: {} created, {} skipped",
                academic_year,
                created.len(),
                skipped
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GenerateCalendarResponse {
                    academic_year,
                    created,
                    skipped,
                },
                "Calendar generated",
            )))
        }
        Err(e) => Ok(storage_error("Calendar generation failed", e)),
    }
}
