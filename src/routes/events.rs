use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::events::requests::{
    CalendarPreviewParams, CreateEventRequest, EventListParams, GenerateCalendarRequest,
    TermsParams, UpdateEventRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EventService;
use crate::utils::SafeIDI64;

static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListParams>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(query.into_inner(), &req).await
}

pub async fn get_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(id.0, &req).await
}

pub async fn create_event(
    req: HttpRequest,
    data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(data.into_inner(), &req).await
}

pub async fn update_event(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(id.0, &req).await
}

pub async fn preview_calendar(
    query: web::Query<CalendarPreviewParams>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.preview_calendar(query.into_inner()).await
}

pub async fn generate_calendar(
    req: HttpRequest,
    data: web::Json<GenerateCalendarRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .generate_calendar(data.into_inner(), &req)
        .await
}

pub async fn terms(req: HttpRequest, query: web::Query<TermsParams>) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.terms(query.into_inner(), &req).await
}

pub fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .wrap(middlewares::RequireJWT)
            .route("/calendar/preview", web::get().to(preview_calendar))
            .service(
                web::resource("/calendar/generate").route(
                    web::post()
                        .to(generate_calendar)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .route("/terms", web::get().to(terms))
            .service(
                web::resource("")
                    .route(web::get().to(list_events))
                    .route(
                        web::post()
                            .to(create_event)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_event))
                    .route(
                        web::put()
                            .to(update_event)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    )
                    .route(
                        web::delete()
                            .to(delete_event)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            ),
    );
}
