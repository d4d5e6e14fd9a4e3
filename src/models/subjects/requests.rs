use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
