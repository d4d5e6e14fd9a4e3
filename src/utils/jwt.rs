use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Refresh Token 所在的 Cookie 名称
pub const REFRESH_COOKIE_NAME: &str = "schoolhub_refresh";
/// Refresh Token Cookie 仅在认证接口下发送
const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // Subject (user ID)
    pub role: String,          // 用户角色
    pub token_type: TokenKind, // token 类型
    pub exp: usize,            // Expiration time (时间戳)
    pub iat: usize,            // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::sign(
            &Self::get_secret(),
            user_id,
            role,
            TokenKind::Access,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token，未指定有效期时使用配置值
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = token_expiry
            .unwrap_or_else(|| chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry));
        Self::sign(
            &Self::get_secret(),
            user_id,
            role,
            TokenKind::Refresh,
            expiry,
        )
    }

    fn sign(
        secret: &str,
        user_id: i64,
        role: &str,
        kind: TokenKind,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: kind,
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn verify(
        secret: &str,
        token: &str,
        expected: TokenKind,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    // 生成完整的 Token 对（access + refresh）
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::get_secret(), token, TokenKind::Access)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::get_secret(), token, TokenKind::Refresh)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        max_age_days: i64,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path(REFRESH_COOKIE_PATH)
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path(REFRESH_COOKIE_PATH)
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_sign_and_verify() {
        let token = JwtUtils::sign(
            SECRET,
            42,
            "teacher",
            TokenKind::Access,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify(SECRET, &token, TokenKind::Access).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_token_kind_mismatch_rejected() {
        let token = JwtUtils::sign(
            SECRET,
            1,
            "admin",
            TokenKind::Refresh,
            chrono::Duration::days(1),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &token, TokenKind::Access).is_err());
        assert!(JwtUtils::verify(SECRET, &token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_wrong_secret_and_expired_rejected() {
        let token = JwtUtils::sign(
            SECRET,
            1,
            "admin",
            TokenKind::Access,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify("other", &token, TokenKind::Access).is_err());

        let expired = JwtUtils::sign(
            SECRET,
            1,
            "admin",
            TokenKind::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &expired, TokenKind::Access).is_err());
    }
}
