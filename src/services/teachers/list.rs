use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse,
    teachers::requests::{TeacherListParams, TeacherListQuery},
};
use crate::services::common::{storage_error, trimmed};

pub async fn list_teachers(
    service: &TeacherService,
    params: TeacherListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (page, size) = params.pagination.normalized();
    let query = TeacherListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        status: params.status,
        search: trimmed(params.search),
    };

    match service
        .get_storage(request)
        .list_teachers_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve teacher list", e)),
    }
}
