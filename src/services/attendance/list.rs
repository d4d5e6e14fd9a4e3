use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, validate_range};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::requests::{AttendanceListParams, AttendanceListQuery},
};
use crate::services::access::resolve_scope;
use crate::services::common::{bad_request, current_user, storage_error};

pub async fn list_attendance(
    service: &AttendanceService,
    params: AttendanceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if let Err(msg) = validate_range(params.from, params.to) {
        return Ok(bad_request(ErrorCode::AttendanceInvalid, msg));
    }
    let storage = service.get_storage(request);

    let scope = match resolve_scope(&storage, &user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    };

    let (page, size) = params.pagination.normalized();
    let query = AttendanceListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        student_ids: scope.student_ids(),
        class_ids: None,
        student_id: params.student_id,
        class_id: params.class_id,
        from: params.from,
        to: params.to,
        status: params.status,
    };

    match storage.list_attendance_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve attendance", e)),
    }
}
