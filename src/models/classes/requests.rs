use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year: Option<String>,
    pub search: Option<String>,
    // 教师只看自己任教的班级
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub mine: Option<bool>,
}

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub academic_year: String,
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
}

// 更新班级请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<String>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub teacher_ids: Option<Vec<i64>>,
    pub subject_ids: Option<Vec<i64>>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    // 仅返回该教师任教的班级
    pub teacher_id: Option<i64>,
    pub academic_year: Option<String>,
    pub search: Option<String>,
}
