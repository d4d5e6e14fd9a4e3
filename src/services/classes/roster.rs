use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassRosterResponse};
use crate::services::access::teaches_class;
use crate::services::common::{current_user, forbidden, not_found, storage_error};

/// 班级花名册：管理员或该班任课教师
pub async fn list_class_students(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(storage_error("Failed to get class", e)),
    };

    match teaches_class(&storage, &user, class.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(forbidden(
                ErrorCode::ClassPermissionDenied,
                "Only administrators and assigned teachers can view the roster",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to check access", e)),
    }

    match storage.list_students_by_class(class.id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassRosterResponse { class, students },
            "Class roster retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to load roster", e)),
    }
}
