//! 服务层共用的响应构造

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::SchoolHubError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

/// 当前登录用户；路由未挂 RequireJWT 时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

/// 存储层错误转为响应
///
/// 冲突 409，校验失败 400，记录不存在 404，余额不足 400，其余 500。
pub(crate) fn storage_error(context: &str, err: SchoolHubError) -> HttpResponse {
    match err {
        SchoolHubError::Conflict(msg) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::Conflict, format!("{context}: {msg}"))),
        SchoolHubError::Validation(msg) => bad_request(ErrorCode::BadRequest, format!("{context}: {msg}")),
        SchoolHubError::NotFound(msg) => not_found(ErrorCode::NotFound, format!("{context}: {msg}")),
        SchoolHubError::InsufficientPoints(msg) => bad_request(ErrorCode::InsufficientPoints, msg),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

/// 校验关联账号存在且角色匹配
pub(crate) async fn ensure_user_role(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    role: UserRole,
    code: ErrorCode,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.role == role => Ok(()),
        Ok(Some(user)) => Err(bad_request(
            code,
            format!("User {user_id} has role {}, expected {role}", user.role),
        )),
        Ok(None) => Err(bad_request(code, format!("User {user_id} does not exist"))),
        Err(e) => Err(storage_error("Failed to check linked user", e)),
    }
}

/// 去掉首尾空白，空串视为未提供
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status() {
        let cases = [
            (SchoolHubError::conflict("dup"), StatusCode::CONFLICT),
            (SchoolHubError::validation("bad"), StatusCode::BAD_REQUEST),
            (SchoolHubError::not_found("gone"), StatusCode::NOT_FOUND),
            (SchoolHubError::insufficient_points("low"), StatusCode::BAD_REQUEST),
            (
                SchoolHubError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(storage_error("op", err).status(), status);
        }
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(Some("  x ".into())), Some("x".into()));
        assert_eq!(trimmed(Some("   ".into())), None);
        assert_eq!(trimmed(None), None);
    }
}
