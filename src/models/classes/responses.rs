use super::entities::SchoolClass;
use crate::models::common::PaginationInfo;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassResponse {
    pub class: SchoolClass,
    pub student_count: u64,
}

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<SchoolClass>,
}

// 班级花名册
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassRosterResponse {
    pub class: SchoolClass,
    pub students: Vec<Student>,
}
