use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResourceService;
use crate::models::resources::responses::ResourceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_error};

pub async fn get_resource(
    service: &ResourceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 不可见的资料按不存在处理
    match service.get_storage(request).get_resource_by_id(id).await {
        Ok(Some(resource)) if resource.is_visible_to(&user.role) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(ResourceResponse { resource }, "Resource retrieved successfully"),
        )),
        Ok(_) => Ok(not_found(ErrorCode::ResourceNotFound, "Resource not found")),
        Err(e) => Ok(storage_error("Failed to load resource", e)),
    }
}
