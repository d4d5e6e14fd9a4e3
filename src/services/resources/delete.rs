use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResourceService, ensure_owner};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_error};

pub async fn delete_resource(
    service: &ResourceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_resource_by_id(id).await {
        Ok(Some(resource)) => {
            if let Err(response) = ensure_owner(&user, &resource) {
                return Ok(response);
            }
        }
        Ok(None) => return Ok(not_found(ErrorCode::ResourceNotFound, "Resource not found")),
        Err(e) => return Ok(storage_error("Failed to load resource", e)),
    }

    match storage.delete_resource(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Resource deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::ResourceNotFound, "Resource not found")),
        Err(e) => Ok(storage_error("Resource deletion failed", e)),
    }
}
