use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Gender, StudentStatus};
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub user_id: Option<i64>,
    pub parent_user_id: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    // 未提供时默认为当天
    pub enrolled_on: Option<NaiveDate>,
}

// 更新学生请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub user_id: Option<i64>,
    pub parent_user_id: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    // 限定在这些班级内（教师视角）
    pub class_ids: Option<Vec<i64>>,
    pub class_id: Option<i64>,
    pub parent_user_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}
