pub mod calendar;
pub mod create;
pub mod delete;
pub mod generate;
pub mod get;
pub mod list;
pub mod terms;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use crate::models::events::requests::{
    CalendarPreviewParams, CreateEventRequest, EventListParams, GenerateCalendarRequest,
    TermsParams, UpdateEventRequest,
};

storage_service!(EventService);

impl EventService {
    pub async fn list_events(
        &self,
        query: EventListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, query, request).await
    }

    pub async fn get_event(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_event(self, id, request).await
    }

    pub async fn create_event(
        &self,
        data: CreateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, data, request).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        data: UpdateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, id, data, request).await
    }

    pub async fn delete_event(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_event(self, id, request).await
    }

    // 校历预览，不落库
    pub async fn preview_calendar(
        &self,
        query: CalendarPreviewParams,
    ) -> ActixResult<HttpResponse> {
        generate::preview_calendar(query).await
    }

    pub async fn generate_calendar(
        &self,
        data: GenerateCalendarRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_calendar(self, data, request).await
    }

    pub async fn terms(&self, query: TermsParams, request: &HttpRequest) -> ActixResult<HttpResponse> {
        terms::list_terms(self, query, request).await
    }
}

const MAX_TITLE_LENGTH: usize = 200;

/// 结束日期不得早于开始日期
pub(crate) fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        Err("End date must not be before start date".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dates() {
        let a = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert!(validate_dates(a, b).is_ok());
        assert!(validate_dates(a, a).is_ok());
        assert!(validate_dates(b, a).is_err());
    }
}
