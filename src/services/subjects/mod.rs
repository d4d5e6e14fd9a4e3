pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::services::common::bad_request;

storage_service!(SubjectService);

impl SubjectService {
    pub async fn list_subjects(
        &self,
        query: SubjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, query, request).await
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_subject(self, id, request).await
    }

    pub async fn create_subject(
        &self,
        data: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, data, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        data: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, id, data, request).await
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, id, request).await
    }
}

// 科目代码：字母数字和连字符，最长 16 位
fn validate_code(code: &str) -> Result<(), HttpResponse> {
    let code = code.trim();
    if code.is_empty()
        || code.len() > 16
        || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(bad_request(
            ErrorCode::SubjectInvalid,
            "Subject code must be 1-16 letters, digits or '-'",
        ));
    }
    Ok(())
}

fn validate_credits(credits: Option<i32>) -> Result<(), HttpResponse> {
    match credits {
        Some(c) if !(0..=20).contains(&c) => Err(bad_request(
            ErrorCode::SubjectInvalid,
            "Credits must be between 0 and 20",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_credit_rules() {
        assert!(validate_code("MATH-101").is_ok());
        assert!(validate_code(" eng ").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("MATH 101").is_err());
        assert!(validate_code("ABCDEFGHIJKLMNOPQ").is_err());
        assert!(validate_credits(None).is_ok());
        assert!(validate_credits(Some(3)).is_ok());
        assert!(validate_credits(Some(-1)).is_err());
    }
}
