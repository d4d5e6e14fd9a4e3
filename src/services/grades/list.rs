use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse,
    grades::requests::{GradeListParams, GradeListQuery},
};
use crate::services::access::resolve_scope;
use crate::services::common::{current_user, storage_error, trimmed};

pub async fn list_grades(
    service: &GradeService,
    params: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let scope = match resolve_scope(&storage, &user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    };

    let (page, size) = params.pagination.normalized();
    let query = GradeListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        student_ids: scope.student_ids(),
        class_ids: None,
        student_id: params.student_id,
        subject_id: params.subject_id,
        class_id: params.class_id,
        term: params.term,
        academic_year: trimmed(params.academic_year),
    };

    match storage.list_grades_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve grade list", e)),
    }
}
