use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::responses::{GradeResponse, GradeView};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::can_view_student;
use crate::services::common::{current_user, forbidden, not_found, storage_error};

pub async fn get_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Ok(storage_error("Failed to load grade", e)),
    };

    let visible = match storage.get_student_by_id(grade.student_id).await {
        Ok(Some(student)) => match can_view_student(&storage, &user, &student).await {
            Ok(visible) => visible,
            Err(e) => return Ok(storage_error("Failed to check access", e)),
        },
        Ok(None) => false,
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    };
    if !visible {
        return Ok(forbidden(
            ErrorCode::GradePermissionDenied,
            "You do not have access to this grade",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeResponse {
            grade: GradeView::from(grade),
        },
        "Grade retrieved successfully",
    )))
}
