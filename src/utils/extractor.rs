//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 与统一的错误响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_path_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id_extractor!(
    /// `{id}` 路径参数
    SafeIDI64,
    "id"
);
define_safe_id_extractor!(
    /// `{student_id}` 路径参数
    SafeStudentIdI64,
    "student_id"
);

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    match req.match_info().get(name).and_then(parse_positive_id) {
        Some(id) => Ok(id),
        None => Err(InternalError::from_response(
            format!("invalid path parameter: {name}"),
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid {name}: must be a positive integer"),
            )),
        )
        .into()),
    }
}

fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id("15"), Some(15));
        assert_eq!(parse_positive_id("0"), None);
        assert_eq!(parse_positive_id("-3"), None);
        assert_eq!(parse_positive_id("abc"), None);
    }

    #[actix_web::test]
    async fn test_extract_from_match_info() {
        let req = TestRequest::default().param("id", "7").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 7);

        let req = TestRequest::default()
            .param("student_id", "x")
            .to_http_request();
        assert!(SafeStudentIdI64::extract(&req).await.is_err());
    }
}
