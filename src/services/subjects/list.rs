use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse,
    subjects::requests::{SubjectListParams, SubjectListQuery},
};
use crate::services::common::{storage_error, trimmed};

pub async fn list_subjects(
    service: &SubjectService,
    params: SubjectListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (page, size) = params.pagination.normalized();
    let query = SubjectListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        search: trimmed(params.search),
    };

    match service
        .get_storage(request)
        .list_subjects_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve subject list", e)),
    }
}
