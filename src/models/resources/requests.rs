use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ResourceCategory, ResourceVisibility};
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct ResourceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<ResourceCategory>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub subject_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub url: String,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub visibility: Option<ResourceVisibility>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "resource.ts")]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ResourceCategory>,
    pub url: Option<String>,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub visibility: Option<ResourceVisibility>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub visibilities: Option<Vec<ResourceVisibility>>,
    pub category: Option<ResourceCategory>,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub search: Option<String>,
}
