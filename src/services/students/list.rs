use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse,
    students::requests::{StudentListParams, StudentListQuery},
    users::entities::UserRole,
};
use crate::services::access::{Scope, resolve_scope};
use crate::services::common::{current_user, storage_error, trimmed};

pub async fn list_students(
    service: &StudentService,
    params: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (page, size) = params.pagination.normalized();
    let mut query = StudentListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        class_id: params.class_id,
        status: params.status,
        search: trimmed(params.search),
        ..Default::default()
    };

    // 按角色收窄可见范围
    match user.role {
        UserRole::Admin => {}
        UserRole::Teacher => match resolve_scope(&storage, &user).await {
            Ok(scope) => {
                if let Scope::Teacher { class_ids, .. } = scope {
                    query.class_ids = Some(class_ids);
                }
            }
            Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
        },
        UserRole::Student => query.user_id = Some(user.id),
        UserRole::Parent => query.parent_user_id = Some(user.id),
    }

    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve student list", e)),
    }
}
