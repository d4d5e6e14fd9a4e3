use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolHubError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::{UserRole, UserStatus}, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_http_url, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 管理员不能把自己降级或停用
    if RequireJWT::extract_user_id(request) == Some(user_id)
        && (update_data.role.is_some_and(|r| r != UserRole::Admin)
            || update_data.status.is_some_and(|s| s != UserStatus::Active))
    {
        return Ok(bad_request(
            ErrorCode::UserUpdateFailed,
            "Cannot change your own role or status",
        ));
    }

    if let Some(ref email) = update_data.email {
        let email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(&email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        update_data.email = Some(email);
    }
    update_data.display_name = trimmed(update_data.display_name);
    update_data.avatar_url = trimmed(update_data.avatar_url);
    if let Some(ref url) = update_data.avatar_url
        && let Err(msg) = validate_http_url(url)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => return Ok(storage_error("Password hashing failed", e)),
        }
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            RequireJWT::invalidate_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserEmailAlreadyExists, "Email already in use"),
        )),
        Err(e) => Ok(storage_error("Failed to update user information", e)),
    }
}
