pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::common::{bad_request, ensure_user_role, storage_error};
use crate::storage::Storage;

storage_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn create_student(
        &self,
        data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, data, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, data, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }
}

/// 校验学生引用的班级与账号
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    class_id: Option<i64>,
    user_id: Option<i64>,
    parent_user_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(class_id) = class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(bad_request(
                    ErrorCode::ClassNotFound,
                    format!("Class {class_id} does not exist"),
                ));
            }
            Err(e) => return Err(storage_error("Failed to check class", e)),
        }
    }
    if let Some(user_id) = user_id {
        ensure_user_role(storage, user_id, UserRole::Student, ErrorCode::StudentInvalid).await?;
    }
    if let Some(parent_user_id) = parent_user_id {
        ensure_user_role(storage, parent_user_id, UserRole::Parent, ErrorCode::StudentInvalid)
            .await?;
    }
    Ok(())
}
