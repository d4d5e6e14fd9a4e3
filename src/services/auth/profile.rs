use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, not_found, storage_error, trimmed};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_http_url, validate_password_simple};

use super::AuthService;

/// 更新本人资料，不允许修改角色与状态
pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let email = update_data.email.map(|e| e.trim().to_lowercase());
    if let Some(ref email) = email {
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != current_user.id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already in use",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(storage_error("Failed to update profile", e)),
        }
    }

    let avatar_url = trimmed(update_data.avatar_url);
    if let Some(ref url) = avatar_url
        && let Err(msg) = validate_http_url(url)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let password = match update_data.password {
        Some(ref password) => {
            if let Err(msg) = validate_password_simple(password) {
                return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(storage_error("Password hashing failed", e)),
            }
        }
        None => None,
    };

    let storage_update = UpdateUserRequest {
        email,
        password,
        role: None,
        status: None,
        display_name: trimmed(update_data.display_name),
        avatar_url,
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            RequireJWT::invalidate_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error("Failed to update profile", e)),
    }
}
