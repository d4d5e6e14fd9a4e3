pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::common::{bad_request, ensure_user_role, storage_error};
use crate::storage::Storage;
use crate::utils::validate::validate_email;

storage_service!(TeacherService);

impl TeacherService {
    pub async fn list_teachers(
        &self,
        query: TeacherListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, query, request).await
    }

    pub async fn get_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_teacher(self, id, request).await
    }

    pub async fn create_teacher(
        &self,
        data: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, data, request).await
    }

    pub async fn update_teacher(
        &self,
        id: i64,
        data: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, id, data, request).await
    }

    pub async fn delete_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, id, request).await
    }
}

/// 所有科目 ID 都必须存在
pub(crate) async fn check_subjects(
    storage: &Arc<dyn Storage>,
    subject_ids: &[i64],
    code: ErrorCode,
) -> Result<(), HttpResponse> {
    if subject_ids.is_empty() {
        return Ok(());
    }
    match storage.list_subjects_by_ids(subject_ids).await {
        Ok(found) => {
            let missing: Vec<String> = subject_ids
                .iter()
                .filter(|id| !found.iter().any(|s| s.id == **id))
                .map(|id| id.to_string())
                .collect();
            if missing.is_empty() {
                Ok(())
            } else {
                Err(bad_request(
                    code,
                    format!("Unknown subject ids: {}", missing.join(", ")),
                ))
            }
        }
        Err(e) => Err(storage_error("Failed to check subjects", e)),
    }
}

pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    user_id: Option<i64>,
    email: Option<&str>,
    subject_ids: &[i64],
) -> Result<(), HttpResponse> {
    if let Some(email) = email
        && let Err(msg) = validate_email(email)
    {
        return Err(bad_request(ErrorCode::TeacherInvalid, msg));
    }
    if let Some(user_id) = user_id {
        ensure_user_role(storage, user_id, UserRole::Teacher, ErrorCode::TeacherInvalid).await?;
    }
    check_subjects(storage, subject_ids, ErrorCode::TeacherInvalid).await
}
