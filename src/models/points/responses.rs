use serde::Serialize;
use ts_rs::TS;

use super::entities::{LeaderboardEntry, PointRule, PointSuggestion, PointTransaction};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct TransactionResponse {
    pub transaction: PointTransaction,
    // 变动后的余额
    pub balance: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct TransactionListResponse {
    pub items: Vec<PointTransaction>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct LeaderboardResponse {
    pub class_id: Option<i64>,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointRuleResponse {
    pub rule: PointRule,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct PointRuleListResponse {
    pub items: Vec<PointRule>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct SuggestionResponse {
    pub suggestion: PointSuggestion,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct SuggestionListResponse {
    pub items: Vec<PointSuggestion>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct GenerateSuggestionsResponse {
    // 匹配到的候选数量
    pub matched: usize,
    // 因窗口期内已有建议而跳过的数量
    pub skipped: usize,
    pub created: Vec<PointSuggestion>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "points.ts")]
pub struct ReviewSuggestionResponse {
    pub suggestion: PointSuggestion,
    pub transaction: Option<PointTransaction>,
}
