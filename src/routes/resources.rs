use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::resources::requests::{
    CreateResourceRequest, ResourceListParams, UpdateResourceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResourceService;
use crate::utils::SafeIDI64;

static RESOURCE_SERVICE: Lazy<ResourceService> = Lazy::new(ResourceService::new_lazy);

pub async fn list_resources(
    req: HttpRequest,
    query: web::Query<ResourceListParams>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.list_resources(query.into_inner(), &req).await
}

pub async fn get_resource(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.get_resource(id.0, &req).await
}

pub async fn create_resource(
    req: HttpRequest,
    data: web::Json<CreateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.create_resource(data.into_inner(), &req).await
}

pub async fn update_resource(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .update_resource(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_resource(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.delete_resource(id.0, &req).await
}

// 修改与删除：管理员或上传者，由服务层判断
pub fn configure_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/resources")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_resources))
                    .route(
                        web::post()
                            .to(create_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_resource))
                    .route(
                        web::put()
                            .to(update_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_resource)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
