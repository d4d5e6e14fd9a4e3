use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, ReportCardParams, UpdateGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(data.into_inner(), &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(id.0, &req).await
}

pub async fn report_card(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ReportCardParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .report_card(student_id.0, query.into_inner(), &req)
        .await
}

// 录入与修改需教职工身份，是否任教该班级由服务层判断
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route("/report/{student_id}", web::get().to(report_card))
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    .route(
                        web::post()
                            .to(create_grade)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_grade))
                    .route(
                        web::put()
                            .to(update_grade)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_grade)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
