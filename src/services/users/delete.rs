use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_error};

/// 初始管理员账号的 ID
const ROOT_USER_ID: i64 = 1;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if user_id == ROOT_USER_ID || RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete the current user or the initial administrator",
        ));
    }

    let storage = service.get_storage(request);

    match storage.delete_user(user_id).await {
        Ok(true) => {
            RequireJWT::invalidate_user(request, user_id).await;
            info!("User {} deleted", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error("User deletion failed", e)),
    }
}
