pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::resources::{
    entities::DocumentResource,
    requests::{CreateResourceRequest, ResourceListParams, UpdateResourceRequest},
};
use crate::models::users::entities::{User, UserRole};
use crate::services::common::{bad_request, forbidden, storage_error};
use crate::storage::Storage;

storage_service!(ResourceService);

impl ResourceService {
    pub async fn list_resources(
        &self,
        query: ResourceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_resources(self, query, request).await
    }

    pub async fn get_resource(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_resource(self, id, request).await
    }

    pub async fn create_resource(
        &self,
        data: CreateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_resource(self, data, request).await
    }

    pub async fn update_resource(
        &self,
        id: i64,
        data: UpdateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_resource(self, id, data, request).await
    }

    pub async fn delete_resource(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_resource(self, id, request).await
    }
}

/// 管理员或上传者可以修改
pub(crate) fn ensure_owner(user: &User, resource: &DocumentResource) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin || resource.uploaded_by == user.id {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::ResourcePermissionDenied,
            "Only administrators and the uploader can change this resource",
        ))
    }
}

/// 关联的班级和科目必须存在
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    class_id: Option<i64>,
    subject_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(class_id) = class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(bad_request(
                    ErrorCode::ResourceInvalid,
                    format!("Class {class_id} does not exist"),
                ));
            }
            Err(e) => return Err(storage_error("Failed to load class", e)),
        }
    }
    if let Some(subject_id) = subject_id {
        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(bad_request(
                    ErrorCode::ResourceInvalid,
                    format!("Subject {subject_id} does not exist"),
                ));
            }
            Err(e) => return Err(storage_error("Failed to load subject", e)),
        }
    }
    Ok(())
}
