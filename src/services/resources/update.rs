use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResourceService, check_references, ensure_owner};
use crate::models::resources::{requests::UpdateResourceRequest, responses::ResourceResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, not_found, storage_error};
use crate::utils::validate::{validate_http_url, validate_required};

pub async fn update_resource(
    service: &ResourceService,
    id: i64,
    mut data: UpdateResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_resource_by_id(id).await {
        Ok(Some(resource)) => resource,
        Ok(None) => return Ok(not_found(ErrorCode::ResourceNotFound, "Resource not found")),
        Err(e) => return Ok(storage_error("Failed to load resource", e)),
    };
    if let Err(response) = ensure_owner(&user, &existing) {
        return Ok(response);
    }

    if let Some(title) = data.title.take() {
        let title = title.trim().to_string();
        if let Err(msg) = validate_required("title", &title, 200) {
            return Ok(bad_request(ErrorCode::ResourceInvalid, msg));
        }
        data.title = Some(title);
    }
    if let Some(url) = data.url.take() {
        let url = url.trim().to_string();
        if let Err(msg) = validate_http_url(&url) {
            return Ok(bad_request(ErrorCode::ResourceInvalid, msg));
        }
        data.url = Some(url);
    }
    if let Err(response) = check_references(&storage, data.class_id, data.subject_id).await {
        return Ok(response);
    }

    match storage.update_resource(id, data).await {
        Ok(Some(resource)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResourceResponse { resource },
            "Resource updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ResourceNotFound, "Resource not found")),
        Err(e) => Ok(storage_error("Resource update failed", e)),
    }
}
