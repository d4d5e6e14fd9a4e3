use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::points::requests::{
    CreatePointRuleRequest, CreateTransactionRequest, GenerateSuggestionsRequest,
    LeaderboardParams, PointRuleListParams, SuggestionListParams, TransactionListParams,
    UpdatePointRuleRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PointService;
use crate::utils::SafeIDI64;

static POINT_SERVICE: Lazy<PointService> = Lazy::new(PointService::new_lazy);

pub async fn list_transactions(
    req: HttpRequest,
    query: web::Query<TransactionListParams>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.list_transactions(query.into_inner(), &req).await
}

pub async fn create_transaction(
    req: HttpRequest,
    data: web::Json<CreateTransactionRequest>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.create_transaction(data.into_inner(), &req).await
}

pub async fn leaderboard(
    req: HttpRequest,
    query: web::Query<LeaderboardParams>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.leaderboard(query.into_inner(), &req).await
}

pub async fn list_rules(
    req: HttpRequest,
    query: web::Query<PointRuleListParams>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.list_rules(query.into_inner(), &req).await
}

pub async fn get_rule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POINT_SERVICE.get_rule(id.0, &req).await
}

pub async fn create_rule(
    req: HttpRequest,
    data: web::Json<CreatePointRuleRequest>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.create_rule(data.into_inner(), &req).await
}

pub async fn update_rule(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdatePointRuleRequest>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.update_rule(id.0, data.into_inner(), &req).await
}

pub async fn delete_rule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POINT_SERVICE.delete_rule(id.0, &req).await
}

pub async fn list_suggestions(
    req: HttpRequest,
    query: web::Query<SuggestionListParams>,
) -> ActixResult<HttpResponse> {
    POINT_SERVICE.list_suggestions(query.into_inner(), &req).await
}

pub async fn generate_suggestions(
    req: HttpRequest,
    data: Option<web::Json<GenerateSuggestionsRequest>>,
) -> ActixResult<HttpResponse> {
    let data = data.map(web::Json::into_inner).unwrap_or_default();
    POINT_SERVICE.generate_suggestions(data, &req).await
}

pub async fn approve_suggestion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POINT_SERVICE.approve_suggestion(id.0, &req).await
}

pub async fn reject_suggestion(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POINT_SERVICE.reject_suggestion(id.0, &req).await
}

pub fn configure_point_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/points")
            .wrap(middlewares::RequireJWT)
            .route("/leaderboard", web::get().to(leaderboard))
            .service(
                web::resource("/transactions")
                    .route(web::get().to(list_transactions))
                    .route(
                        web::post()
                            .to(create_transaction)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            // 规则：教职工可查看，管理员可维护
            .service(
                web::resource("/rules")
                    .route(
                        web::get()
                            .to(list_rules)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_rule)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/rules/{id}")
                    .route(
                        web::get()
                            .to(get_rule)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_rule)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    )
                    .route(
                        web::delete()
                            .to(delete_rule)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .route("/suggestions", web::get().to(list_suggestions))
            .service(
                web::scope("/suggestions")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("/generate", web::post().to(generate_suggestions))
                    .route("/{id}/approve", web::post().to(approve_suggestion))
                    .route("/{id}/reject", web::post().to(reject_suggestion)),
            ),
    );
}
