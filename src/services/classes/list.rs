use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{
    ApiResponse,
    classes::requests::{ClassListQuery, ClassQueryParams},
    users::entities::UserRole,
};
use crate::services::access::teacher_profile;
use crate::services::common::{current_user, storage_error, trimmed};

pub async fn list_classes(
    service: &ClassService,
    params: ClassQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (page, size) = params.pagination.normalized();
    let mut query = ClassListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        teacher_id: None,
        academic_year: trimmed(params.academic_year),
        search: trimmed(params.search),
    };

    // mine=true：教师只看自己任教的班级
    if params.mine.unwrap_or(false) && user.role == UserRole::Teacher {
        match teacher_profile(&storage, &user).await {
            // 没有教师档案时用不存在的 ID，结果为空
            Ok(teacher) => query.teacher_id = Some(teacher.map_or(0, |t| t.id)),
            Err(e) => return Ok(storage_error("Failed to load teacher profile", e)),
        }
    }

    match storage.list_classes_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve class list", e)),
    }
}
