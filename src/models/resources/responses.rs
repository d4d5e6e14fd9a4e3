use serde::Serialize;
use ts_rs::TS;

use super::entities::DocumentResource;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct ResourceResponse {
    pub resource: DocumentResource,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct ResourceListResponse {
    pub items: Vec<DocumentResource>,
    pub pagination: PaginationInfo,
}
