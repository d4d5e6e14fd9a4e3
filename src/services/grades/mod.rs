pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod report;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, ReportCardParams, UpdateGradeRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::services::access::teaches_class;
use crate::services::common::{forbidden, storage_error};
use crate::storage::Storage;

storage_service!(GradeService);

impl GradeService {
    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_grade(self, id, request).await
    }

    pub async fn create_grade(
        &self,
        data: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, data, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        data: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, data, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }

    // 成绩单
    pub async fn report_card(
        &self,
        student_id: i64,
        query: ReportCardParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::report_card(self, student_id, query, request).await
    }
}

/// 修改已有成绩：管理员，或成绩所在班级的任课教师
pub(crate) async fn ensure_can_edit(
    storage: &Arc<dyn Storage>,
    user: &User,
    grade: &Grade,
) -> Result<(), HttpResponse> {
    let class_id = match grade.class_id {
        Some(id) => Some(id),
        None => match storage.get_student_by_id(grade.student_id).await {
            Ok(student) => student.and_then(|s| s.class_id),
            Err(e) => return Err(storage_error("Failed to load student", e)),
        },
    };

    let allowed = match class_id {
        Some(class_id) => match teaches_class(storage, user, class_id).await {
            Ok(allowed) => allowed,
            Err(e) => return Err(storage_error("Failed to check access", e)),
        },
        None => user.role == UserRole::Admin,
    };

    if allowed {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::GradePermissionDenied,
            "Only administrators and the class's teachers can change this grade",
        ))
    }
}
