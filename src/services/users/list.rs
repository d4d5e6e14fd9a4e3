use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::common::{storage_error, trimmed};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (page, size) = query.pagination.normalized();
    let list_query = UserListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        role: query.role,
        status: query.status,
        search: trimmed(query.search),
    };

    match service
        .get_storage(request)
        .list_users_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "User list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve user list", e)),
    }
}
