use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_code, validate_credits};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{requests::CreateSubjectRequest, responses::SubjectResponse},
};
use crate::services::common::{bad_request, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn create_subject(
    service: &SubjectService,
    mut data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = validate_code(&data.code).and(validate_credits(data.credits)) {
        return Ok(response);
    }
    if let Err(msg) = validate_required("name", &data.name, 128) {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }
    data.description = trimmed(data.description);

    match service.get_storage(request).create_subject(data).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            SubjectResponse { subject },
            "Subject created successfully",
        ))),
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject code already exists"),
        )),
        Err(e) => Ok(storage_error("Subject creation failed", e)),
    }
}
