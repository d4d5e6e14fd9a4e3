use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ResourceService, check_references};
use crate::models::resources::{requests::CreateResourceRequest, responses::ResourceResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, storage_error, trimmed};
use crate::utils::validate::{validate_http_url, validate_required};

pub async fn create_resource(
    service: &ResourceService,
    mut data: CreateResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    data.title = data.title.trim().to_string();
    data.url = data.url.trim().to_string();
    data.description = trimmed(data.description);
    if let Err(msg) = validate_required("title", &data.title, 200) {
        return Ok(bad_request(ErrorCode::ResourceInvalid, msg));
    }
    if let Err(msg) = validate_http_url(&data.url) {
        return Ok(bad_request(ErrorCode::ResourceInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_references(&storage, data.class_id, data.subject_id).await {
        return Ok(response);
    }

    match storage.create_resource(data, user.id).await {
        Ok(resource) => {
            info!("Resource {} shared by user {}", resource.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ResourceResponse { resource },
                "Resource created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Resource creation failed", e)),
    }
}
