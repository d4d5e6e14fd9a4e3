/*!
 * 速率限制中间件
 *
 * 固定窗口计数：每个限制键在窗口开始后累计请求数，窗口结束后重新计数。
 * 已认证请求按用户 ID 计数，匿名请求按客户端 IP 计数。
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .service(
 *         web::resource("/login")
 *             .wrap(RateLimit::login())
 *             .route(web::post().to(login)),
 *     )
 * ```
 *
 * 超过限制返回 429，并带 `Retry-After` 头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 计数缓存，键为 `前缀:标识`，值为（窗口内计数，窗口开始时间）
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u32, Instant)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
        }
    }

    /// 登录：5 次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 注册：3 次/分钟
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    /// 刷新令牌：10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 发送站内信：30 次/分钟
    pub fn send_message() -> Self {
        Self::new("message", 30, 60)
    }
}

enum Decision {
    Allow { remaining: u32 },
    Deny { retry_after: u64 },
}

// 根据当前窗口状态计算本次请求是否放行，以及新的窗口状态
fn decide(
    entry: Option<(u32, Instant)>,
    now: Instant,
    max_requests: u32,
    window: Duration,
) -> (Decision, (u32, Instant)) {
    let (count, started) = match entry {
        Some((count, started)) if now.duration_since(started) < window => (count, started),
        _ => (0, now),
    };

    if count >= max_requests {
        let elapsed = now.duration_since(started);
        let retry_after = window.saturating_sub(elapsed).as_secs().max(1);
        return (Decision::Deny { retry_after }, (count, started));
    }

    let count = count + 1;
    (
        Decision::Allow {
            remaining: max_requests - count,
        },
        (count, started),
    )
}

// 客户端 IP：连接地址优先，其次 X-Forwarded-For 第一个地址，再次 X-Real-IP
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    let header_ip = |name: &str, first_only: bool| -> Option<String> {
        let value = req.headers().get(name)?.to_str().ok()?;
        let candidate = if first_only {
            value.split(',').next()?
        } else {
            value
        };
        let candidate = candidate.trim();
        candidate
            .parse::<IpAddr>()
            .is_ok()
            .then(|| candidate.to_string())
    };

    header_ip("X-Forwarded-For", true)
        .or_else(|| header_ip("X-Real-IP", false))
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let identifier = req
                .extensions()
                .get::<User>()
                .map(|user| format!("user:{}", user.id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));
            let cache_key = format!("{}:{}", limit.key_prefix, identifier);

            let entry = RATE_LIMIT_CACHE.get(&cache_key).await;
            let (decision, state) = decide(
                entry,
                Instant::now(),
                limit.max_requests,
                Duration::from_secs(limit.window_secs),
            );
            RATE_LIMIT_CACHE.insert(cache_key.clone(), state).await;

            match decision {
                Decision::Deny { retry_after } => {
                    warn!(
                        "Rate limit exceeded for key: {} (limit: {}/{}s)",
                        cache_key, limit.max_requests, limit.window_secs
                    );
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ))
                }
                Decision::Allow { remaining } => {
                    let mut res = srv.call(req).await?;
                    if let Ok(value) = remaining.to_string().parse() {
                        res.headers_mut().insert(
                            actix_web::http::header::HeaderName::from_static(
                                "x-ratelimit-remaining",
                            ),
                            value,
                        );
                    }
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::send_message().key_prefix, "message");
    }

    #[test]
    fn test_window_counts_and_resets() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let mut state = None;
        for expected_remaining in [1, 0] {
            let (decision, next) = decide(state, start, 2, window);
            match decision {
                Decision::Allow { remaining } => assert_eq!(remaining, expected_remaining),
                Decision::Deny { .. } => panic!("should be allowed"),
            }
            state = Some(next);
        }

        let (decision, next) = decide(state, start + Duration::from_secs(20), 2, window);
        match decision {
            Decision::Deny { retry_after } => assert_eq!(retry_after, 40),
            Decision::Allow { .. } => panic!("should be denied"),
        }

        // 窗口结束后重新计数
        let (decision, next) = decide(Some(next), start + Duration::from_secs(61), 2, window);
        assert!(matches!(decision, Decision::Allow { remaining: 1 }));
        assert_eq!(next.0, 1);
    }
}
