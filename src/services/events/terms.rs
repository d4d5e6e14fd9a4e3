use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use super::calendar::{term_bounds, term_name, validate_academic_year_start};
use crate::models::events::{
    entities::{SchoolEvent, academic_year_label, academic_year_start_for},
    requests::TermsParams,
    responses::{AcademicTerm, TermGroup, TermsResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, storage_error};

/// 按开始日期把事件归入学期，不在任何学期内的丢弃
pub(crate) fn group_into_terms(terms: Vec<AcademicTerm>, events: Vec<SchoolEvent>) -> Vec<TermGroup> {
    let mut groups: Vec<TermGroup> = terms
        .into_iter()
        .map(|term| TermGroup {
            term,
            name: term_name(term.term).to_string(),
            events: Vec::new(),
        })
        .collect();
    for event in events {
        if let Some(group) = groups.iter_mut().find(|g| g.term.contains(event.start_date)) {
            group.events.push(event);
        }
    }
    groups
}

pub async fn list_terms(
    service: &EventService,
    params: TermsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let start = params
        .academic_year_start
        .unwrap_or_else(|| academic_year_start_for(chrono::Local::now().date_naive()));
    if let Err(msg) = validate_academic_year_start(start) {
        return Ok(bad_request(ErrorCode::EventInvalid, msg));
    }

    let terms = term_bounds(start);
    let (Some(first), Some(last)) = (terms.first().copied(), terms.last().copied()) else {
        return Ok(bad_request(ErrorCode::EventInvalid, "Invalid academic year"));
    };

    match service
        .get_storage(request)
        .list_events_between(first.start_date, last.end_date)
        .await
    {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TermsResponse {
                academic_year: academic_year_label(start),
                terms: group_into_terms(terms, events),
            },
            "Academic terms retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to load events", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::entities::{EventSource, EventType};
    use crate::services::events::calendar::MAX_CALENDAR_YEAR;
    use chrono::{NaiveDate, Utc};

    fn event(id: i64, y: i32, m: u32, d: u32) -> SchoolEvent {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        SchoolEvent {
            id,
            title: format!("event-{id}"),
            description: None,
            event_type: EventType::Other,
            start_date: date,
            end_date: date,
            all_day: true,
            term: None,
            academic_year: None,
            source: EventSource::Manual,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn test_terms_reject_out_of_range_year() {
        let request = actix_web::test::TestRequest::default().to_http_request();
        for start in [i32::MAX, MAX_CALENDAR_YEAR] {
            let response = list_terms(
                &EventService::new_lazy(),
                TermsParams {
                    academic_year_start: Some(start),
                },
                &request,
            )
            .await
            .unwrap();
            assert_eq!(response.status(), 400);
        }
    }

    #[test]
    fn test_group_into_terms() {
        let events = vec![
            event(1, 2024, 9, 8),
            event(2, 2025, 2, 11),
            event(3, 2025, 7, 26),
            // 假期
            event(4, 2025, 8, 24),
        ];
        let groups = group_into_terms(term_bounds(2024), events);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, "First Term");
        assert_eq!(groups[0].events.len(), 1);
        assert_eq!(groups[1].events[0].id, 2);
        assert_eq!(groups[2].events[0].id, 3);
        assert_eq!(groups.iter().map(|g| g.events.len()).sum::<usize>(), 3);
    }
}
