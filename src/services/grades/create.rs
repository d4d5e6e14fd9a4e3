use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::grades::{
    entities::{validate_score, validate_term},
    requests::{CreateGradeRequest, NewGrade},
    responses::{GradeResponse, GradeView},
};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::access::{teacher_profile, teaches_class};
use crate::services::common::{
    bad_request, current_user, forbidden, not_found, storage_error, trimmed,
};
use crate::utils::validate::validate_academic_year;

pub async fn create_grade(
    service: &GradeService,
    data: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(msg) = validate_score(data.score, data.max_score).and(validate_term(data.term)) {
        return Ok(bad_request(ErrorCode::GradeInvalid, msg));
    }
    let academic_year = data.academic_year.trim().to_string();
    if let Err(msg) = validate_academic_year(&academic_year) {
        return Ok(bad_request(ErrorCode::GradeInvalid, msg));
    }

    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(data.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    };
    match storage.get_subject_by_id(data.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(storage_error("Failed to load subject", e)),
    }

    // 未指定班级时使用学生当前班级
    let class_id = data.class_id.or(student.class_id);
    let allowed = match class_id {
        Some(class_id) => match teaches_class(&storage, &user, class_id).await {
            Ok(allowed) => allowed,
            Err(e) => return Ok(storage_error("Failed to check access", e)),
        },
        None => user.role == UserRole::Admin,
    };
    if !allowed {
        return Ok(forbidden(
            ErrorCode::GradePermissionDenied,
            "Only administrators and the class's teachers can record grades",
        ));
    }

    let teacher_id = match teacher_profile(&storage, &user).await {
        Ok(teacher) => teacher.map(|t| t.id),
        Err(e) => return Ok(storage_error("Failed to load teacher profile", e)),
    };

    let new_grade = NewGrade {
        student_id: student.id,
        subject_id: data.subject_id,
        class_id,
        teacher_id,
        assessment_type: data.assessment_type,
        term: data.term,
        academic_year,
        score: data.score,
        max_score: data.max_score,
        comment: trimmed(data.comment),
        assessed_on: data
            .assessed_on
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    };

    match storage.create_grade(new_grade).await {
        Ok(grade) => {
            info!(
                "Grade {} recorded for student {} by user {}",
                grade.id, grade.student_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GradeResponse {
                    grade: GradeView::from(grade),
                },
                "Grade recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to record grade", e)),
    }
}
