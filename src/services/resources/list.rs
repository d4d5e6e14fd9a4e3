use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResourceService;
use crate::models::ApiResponse;
use crate::models::resources::{
    entities::ResourceVisibility,
    requests::{ResourceListParams, ResourceListQuery},
};
use crate::services::common::{current_user, storage_error, trimmed};

pub async fn list_resources(
    service: &ResourceService,
    params: ResourceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let visibilities = if user.role.is_staff() {
        None
    } else {
        Some(ResourceVisibility::visible_for(&user.role).to_vec())
    };

    let (page, size) = params.pagination.normalized();
    let query = ResourceListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        visibilities,
        category: params.category,
        class_id: params.class_id,
        subject_id: params.subject_id,
        search: trimmed(params.search),
    };

    match service
        .get_storage(request)
        .list_resources_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Resource list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve resources", e)),
    }
}
