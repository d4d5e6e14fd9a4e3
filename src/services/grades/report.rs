use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::{
    entities::validate_term, requests::ReportCardParams, responses::ReportCard,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::can_view_student;
use crate::services::common::{
    bad_request, current_user, forbidden, not_found, storage_error, trimmed,
};

/// 成绩单：按科目平均，可限定学期与学年
pub async fn report_card(
    service: &GradeService,
    student_id: i64,
    params: ReportCardParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if let Some(term) = params.term
        && let Err(msg) = validate_term(term)
    {
        return Ok(bad_request(ErrorCode::GradeInvalid, msg));
    }
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    };
    match can_view_student(&storage, &user, &student).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(forbidden(
                ErrorCode::GradePermissionDenied,
                "You do not have access to this student's grades",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to check access", e)),
    }

    let academic_year = trimmed(params.academic_year);
    let grades = match storage
        .list_student_grades(student.id, params.term, academic_year.clone())
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_error("Failed to load grades", e)),
    };

    let mut subject_ids: Vec<i64> = grades.iter().map(|g| g.subject_id).collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();
    let subject_names: BTreeMap<i64, String> = match storage.list_subjects_by_ids(&subject_ids).await
    {
        Ok(subjects) => subjects.into_iter().map(|s| (s.id, s.name)).collect(),
        Err(e) => return Ok(storage_error("Failed to load subjects", e)),
    };

    let card = ReportCard::build(
        student.id,
        params.term,
        academic_year,
        &grades,
        &subject_names,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(card, "Report card generated")))
}
