pub mod leaderboard;
pub mod matcher;
pub mod rules;
pub mod suggestions;
pub mod transactions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::points::requests::{
    CreatePointRuleRequest, CreateTransactionRequest, GenerateSuggestionsRequest,
    LeaderboardParams, PointRuleListParams, SuggestionListParams, TransactionListParams,
    UpdatePointRuleRequest,
};

storage_service!(PointService);

impl PointService {
    // 积分流水
    pub async fn create_transaction(
        &self,
        data: CreateTransactionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transactions::create_transaction(self, data, request).await
    }

    pub async fn list_transactions(
        &self,
        query: TransactionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transactions::list_transactions(self, query, request).await
    }

    pub async fn leaderboard(
        &self,
        query: LeaderboardParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        leaderboard::leaderboard(self, query, request).await
    }

    // 积分规则
    pub async fn list_rules(
        &self,
        query: PointRuleListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rules::list_rules(self, query, request).await
    }

    pub async fn get_rule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        rules::get_rule(self, id, request).await
    }

    pub async fn create_rule(
        &self,
        data: CreatePointRuleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rules::create_rule(self, data, request).await
    }

    pub async fn update_rule(
        &self,
        id: i64,
        data: UpdatePointRuleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rules::update_rule(self, id, data, request).await
    }

    pub async fn delete_rule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        rules::delete_rule(self, id, request).await
    }

    // 积分建议
    pub async fn generate_suggestions(
        &self,
        data: GenerateSuggestionsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        suggestions::generate_suggestions(self, data, request).await
    }

    pub async fn list_suggestions(
        &self,
        query: SuggestionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        suggestions::list_suggestions(self, query, request).await
    }

    pub async fn approve_suggestion(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        suggestions::review_suggestion(self, id, true, request).await
    }

    pub async fn reject_suggestion(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        suggestions::review_suggestion(self, id, false, request).await
    }
}
