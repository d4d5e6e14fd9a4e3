use serde::Serialize;
use ts_rs::TS;

use super::entities::Subject;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectResponse {
    pub subject: Subject,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
    pub pagination: PaginationInfo,
}
