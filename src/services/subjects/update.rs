use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_code, validate_credits};
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{requests::UpdateSubjectRequest, responses::SubjectResponse},
};
use crate::services::common::{bad_request, not_found, storage_error, trimmed};
use crate::utils::validate::validate_required;

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    mut data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref code) = data.code
        && let Err(response) = validate_code(code)
    {
        return Ok(response);
    }
    if let Err(response) = validate_credits(data.credits) {
        return Ok(response);
    }
    if let Some(ref name) = data.name
        && let Err(msg) = validate_required("name", name, 128)
    {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }
    data.description = trimmed(data.description);

    match service.get_storage(request).update_subject(id, data).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectResponse { subject },
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject code already exists"),
        )),
        Err(e) => Ok(storage_error("Subject update failed", e)),
    }
}
