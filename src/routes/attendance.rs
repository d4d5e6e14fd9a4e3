use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryParams, BulkAttendanceRequest, RecordAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeStudentIdI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    data: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(data.into_inner(), &req)
        .await
}

pub async fn record_bulk(
    req: HttpRequest,
    data: web::Json<BulkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.record_bulk(data.into_inner(), &req).await
}

pub async fn summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<AttendanceSummaryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .summary(student_id.0, query.into_inner(), &req)
        .await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .route("/summary/{student_id}", web::get().to(summary))
            .service(
                web::resource("/bulk").route(
                    web::post()
                        .to(record_bulk)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(
                        web::post()
                            .to(record_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
