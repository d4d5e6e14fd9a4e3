use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::common::{bad_request, storage_error, trimmed};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

/// 家长自助注册；仅在配置开放注册时可用
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !service.get_config().school.allow_registration {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RegistrationDisabled,
            "Self registration is disabled",
        )));
    }

    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    if let Err(msg) = validate_username(&username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_username(&username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error("Registration failed", e)),
    }
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error("Registration failed", e)),
    }

    let password = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(storage_error("Password hashing failed", e)),
    };

    let create = CreateUserRequest {
        username,
        email,
        password,
        role: UserRole::Parent,
        display_name: trimmed(register_request.display_name),
        avatar_url: None,
    };

    match storage.create_user(create).await {
        Ok(user) => {
            info!("Parent account {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Registration successful",
            )))
        }
        Err(e) => Ok(storage_error("Registration failed", e)),
    }
}
