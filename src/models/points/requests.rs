use serde::Deserialize;
use ts_rs::TS;

use super::entities::{PointCategory, RuleCondition, SuggestionStatus};
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct CreateTransactionRequest {
    pub student_id: i64,
    pub points: i32,
    pub reason: String,
    pub category: Option<PointCategory>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct TransactionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub student_id: Option<i64>,
    pub category: Option<PointCategory>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct LeaderboardParams {
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct CreatePointRuleRequest {
    pub name: String,
    pub description: Option<String>,
    pub condition: RuleCondition,
    pub threshold: f64,
    pub window_days: i32,
    pub points: i32,
    pub category: Option<PointCategory>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct UpdatePointRuleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub condition: Option<RuleCondition>,
    pub threshold: Option<f64>,
    pub window_days: Option<i32>,
    pub points: Option<i32>,
    pub category: Option<PointCategory>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointRuleListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct SuggestionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<SuggestionStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct GenerateSuggestionsRequest {
    // 仅为该班级学生生成
    pub class_id: Option<i64>,
}

// 写入存储层的积分流水
#[derive(Debug, Clone)]
pub struct NewPointTransaction {
    pub student_id: i64,
    pub points: i32,
    pub reason: String,
    pub category: PointCategory,
    pub awarded_by: Option<i64>,
    pub rule_id: Option<i64>,
    pub suggestion_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
    pub student_id: Option<i64>,
    pub category: Option<PointCategory>,
}

#[derive(Debug, Clone, Default)]
pub struct PointRuleListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
    pub status: Option<SuggestionStatus>,
    pub student_id: Option<i64>,
}

// 写入存储层的积分建议
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuggestion {
    pub rule_id: i64,
    pub student_id: i64,
    pub points: i32,
    pub reason: String,
}
