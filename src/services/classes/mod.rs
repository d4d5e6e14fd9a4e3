pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod roster;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::services::common::{bad_request, storage_error};
use crate::services::teachers::check_subjects;
use crate::storage::Storage;

storage_service!(ClassService);

impl ClassService {
    pub async fn list_classes(
        &self,
        query: ClassQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, query, request).await
    }

    pub async fn get_class(&self, class_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_class(self, class_id, request).await
    }

    pub async fn create_class(
        &self,
        data: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, data, request).await
    }

    pub async fn update_class(
        &self,
        class_id: i64,
        data: UpdateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, class_id, data, request).await
    }

    pub async fn delete_class(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, class_id, request).await
    }

    // 班级花名册
    pub async fn list_class_students(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::list_class_students(self, class_id, request).await
    }
}

fn normalize_ids(ids: &mut Vec<i64>) {
    ids.sort_unstable();
    ids.dedup();
}

/// 任课教师与开设科目都必须存在
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    teacher_ids: &[i64],
    subject_ids: &[i64],
) -> Result<(), HttpResponse> {
    if !teacher_ids.is_empty() {
        match storage.list_teachers_by_ids(teacher_ids).await {
            Ok(found) if found.len() == teacher_ids.len() => {}
            Ok(found) => {
                let missing: Vec<String> = teacher_ids
                    .iter()
                    .filter(|id| !found.iter().any(|t| t.id == **id))
                    .map(|id| id.to_string())
                    .collect();
                return Err(bad_request(
                    ErrorCode::ClassInvalid,
                    format!("Unknown teacher ids: {}", missing.join(", ")),
                ));
            }
            Err(e) => return Err(storage_error("Failed to check teachers", e)),
        }
    }
    check_subjects(storage, subject_ids, ErrorCode::ClassInvalid).await
}

fn validate_capacity(capacity: Option<i32>) -> Result<(), HttpResponse> {
    match capacity {
        Some(c) if c <= 0 => Err(bad_request(
            ErrorCode::ClassInvalid,
            "Capacity must be greater than 0",
        )),
        _ => Ok(()),
    }
}
