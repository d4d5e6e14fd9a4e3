use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::TeacherStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<TeacherStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct CreateTeacherRequest {
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
    pub qualification: Option<String>,
    pub hired_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject_ids: Option<Vec<i64>>,
    pub qualification: Option<String>,
    pub status: Option<TeacherStatus>,
    pub hired_on: Option<NaiveDate>,
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<TeacherStatus>,
    pub search: Option<String>,
}
