use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, ensure_can_edit};
use crate::models::grades::{
    entities::{validate_score, validate_term},
    requests::UpdateGradeRequest,
    responses::{GradeResponse, GradeView},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, not_found, storage_error, trimmed};
use crate::utils::validate::validate_academic_year;

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    mut data: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Ok(storage_error("Failed to load grade", e)),
    };
    if let Err(response) = ensure_can_edit(&storage, &user, &existing).await {
        return Ok(response);
    }

    // 分数与满分按合并后的值校验
    let score = data.score.unwrap_or(existing.score);
    let max_score = data.max_score.unwrap_or(existing.max_score);
    if let Err(msg) = validate_score(score, max_score) {
        return Ok(bad_request(ErrorCode::GradeInvalid, msg));
    }
    if let Some(term) = data.term
        && let Err(msg) = validate_term(term)
    {
        return Ok(bad_request(ErrorCode::GradeInvalid, msg));
    }
    if let Some(ref year) = data.academic_year {
        let year = year.trim().to_string();
        if let Err(msg) = validate_academic_year(&year) {
            return Ok(bad_request(ErrorCode::GradeInvalid, msg));
        }
        data.academic_year = Some(year);
    }
    data.comment = trimmed(data.comment);

    match storage.update_grade(id, data).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeResponse {
                grade: GradeView::from(grade),
            },
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error("Grade update failed", e)),
    }
}
