use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, storage_error};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

// 刷新失败时顺带清除 cookie
fn refresh_rejected(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let user_id = match JwtUtils::verify_refresh_token(&refresh_token)
        .ok()
        .and_then(|claims| claims.user_id())
    {
        Some(id) => id,
        None => {
            info!("Rejected invalid refresh token");
            return Ok(refresh_rejected(
                "Login expired or invalid, please login again",
            ));
        }
    };

    // 角色以数据库为准，被停用的账号不能续期
    let user = match service.get_storage(request).get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => return Ok(refresh_rejected("Account is not available")),
        Err(e) => return Ok(storage_error("Token refresh failed", e)),
    };

    match JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to generate token: {e}"),
            )),
        ),
    }
}

// 能走到这里说明 RequireJWT 已经校验通过
pub async fn handle_verify_token(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let is_valid = current_user(request).is_ok();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid },
        "Token is valid",
    )))
}

pub async fn handle_get_user(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
