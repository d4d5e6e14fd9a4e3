//! 积分存储操作
//!
//! 学生表上的积分余额只通过流水变动，流水写入与余额调整在同一事务内完成。

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::point_rules::{
    ActiveModel as RuleActiveModel, Column as RuleColumn, Entity as PointRules,
};
use crate::entity::point_suggestions::{
    ActiveModel as SuggestionActiveModel, Column as SuggestionColumn, Entity as PointSuggestions,
};
use crate::entity::point_transactions::{
    ActiveModel as TransactionActiveModel, Column as TransactionColumn,
    Entity as PointTransactions,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::points::{
    entities::{PointCategory, PointRule, PointSuggestion, PointTransaction, SuggestionStatus},
    requests::{
        CreatePointRuleRequest, NewPointTransaction, NewSuggestion, PointRuleListQuery,
        SuggestionListQuery, TransactionListQuery, UpdatePointRuleRequest,
    },
    responses::{PointRuleListResponse, SuggestionListResponse, TransactionListResponse},
};
use crate::models::students::entities::{Student, StudentStatus};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 写入流水并调整余额，余额不允许为负
///
/// 余额在一条带条件的 UPDATE 中变动，并发扣减不会越过零。
async fn apply_transaction<C>(
    conn: &C,
    transaction: NewPointTransaction,
) -> Result<(PointTransaction, i64)>
where
    C: ConnectionTrait,
{
    let delta = i64::from(transaction.points);
    let now = Utc::now().timestamp();

    let updated = Students::update_many()
        .col_expr(
            StudentColumn::Points,
            Expr::col(StudentColumn::Points).add(delta),
        )
        .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
        .filter(StudentColumn::Id.eq(transaction.student_id))
        .filter(Expr::col(StudentColumn::Points).gte(-delta))
        .exec(conn)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("更新积分余额失败: {e}")))?;

    if updated.rows_affected == 0 {
        let student = find_student(conn, transaction.student_id).await?;
        return Err(SchoolHubError::insufficient_points(format!(
            "积分不足: 当前 {}，变动 {}",
            student.points, transaction.points
        )));
    }

    let balance = find_student(conn, transaction.student_id).await?.points;

    let saved = TransactionActiveModel {
        student_id: Set(transaction.student_id),
        points: Set(transaction.points),
        reason: Set(transaction.reason),
        category: Set(transaction.category.to_string()),
        awarded_by: Set(transaction.awarded_by),
        rule_id: Set(transaction.rule_id),
        suggestion_id: Set(transaction.suggestion_id),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| write_error("写入积分流水", e))?;

    Ok((saved.into_transaction(), balance))
}

async fn find_student<C>(conn: &C, id: i64) -> Result<crate::entity::students::Model>
where
    C: ConnectionTrait,
{
    Students::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?
        .ok_or_else(|| SchoolHubError::not_found(format!("学生不存在: {id}")))
}

impl SeaOrmStorage {
    pub async fn create_point_transaction_impl(
        &self,
        transaction: NewPointTransaction,
    ) -> Result<(PointTransaction, i64)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let result = apply_transaction(&txn, transaction).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result)
    }

    pub async fn list_point_transactions_with_pagination_impl(
        &self,
        query: TransactionListQuery,
    ) -> Result<TransactionListResponse> {
        let mut select = PointTransactions::find();

        if let Some(student_ids) = query.student_ids {
            select = select.filter(TransactionColumn::StudentId.is_in(student_ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(TransactionColumn::StudentId.eq(student_id));
        }
        if let Some(category) = query.category {
            select = select.filter(TransactionColumn::Category.eq(category.to_string()));
        }

        select = select
            .order_by_desc(TransactionColumn::CreatedAt)
            .order_by_desc(TransactionColumn::Id);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "积分流水").await?;

        Ok(TransactionListResponse {
            items: items.into_iter().map(|m| m.into_transaction()).collect(),
            pagination,
        })
    }

    /// 积分排行，只统计在读学生
    pub async fn list_top_students_by_points_impl(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Student>> {
        let mut select =
            Students::find().filter(StudentColumn::Status.eq(StudentStatus::Active.to_string()));
        if let Some(class_id) = class_id {
            select = select.filter(StudentColumn::ClassId.eq(class_id));
        }

        let models = select
            .order_by_desc(StudentColumn::Points)
            .order_by_asc(StudentColumn::LastName)
            .order_by_asc(StudentColumn::FirstName)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分排行失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn create_point_rule_impl(
        &self,
        rule: CreatePointRuleRequest,
        created_by: Option<i64>,
    ) -> Result<PointRule> {
        let now = Utc::now().timestamp();

        let model = RuleActiveModel {
            name: Set(rule.name.trim().to_string()),
            description: Set(rule.description),
            condition_type: Set(rule.condition.to_string()),
            threshold: Set(rule.threshold),
            window_days: Set(rule.window_days),
            points: Set(rule.points),
            category: Set(rule.category.unwrap_or(PointCategory::Other).to_string()),
            active: Set(rule.active.unwrap_or(true)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建积分规则", e))?;

        result
            .into_rule()
            .ok_or_else(|| SchoolHubError::database_operation("积分规则条件类型无法识别"))
    }

    pub async fn get_point_rule_by_id_impl(&self, id: i64) -> Result<Option<PointRule>> {
        let result = PointRules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分规则失败: {e}")))?;

        Ok(result.and_then(|m| m.into_rule()))
    }

    pub async fn list_point_rules_with_pagination_impl(
        &self,
        query: PointRuleListQuery,
    ) -> Result<PointRuleListResponse> {
        let mut select = PointRules::find();
        if let Some(active) = query.active {
            select = select.filter(RuleColumn::Active.eq(active));
        }
        select = select.order_by_asc(RuleColumn::Name);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "积分规则").await?;

        Ok(PointRuleListResponse {
            items: items.into_iter().filter_map(|m| m.into_rule()).collect(),
            pagination,
        })
    }

    pub async fn list_active_point_rules_impl(&self) -> Result<Vec<PointRule>> {
        let models = PointRules::find()
            .filter(RuleColumn::Active.eq(true))
            .order_by_asc(RuleColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分规则失败: {e}")))?;

        Ok(models.into_iter().filter_map(|m| m.into_rule()).collect())
    }

    pub async fn update_point_rule_impl(
        &self,
        id: i64,
        update: UpdatePointRuleRequest,
    ) -> Result<Option<PointRule>> {
        if self.get_point_rule_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = RuleActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(condition) = update.condition {
            model.condition_type = Set(condition.to_string());
        }
        if let Some(threshold) = update.threshold {
            model.threshold = Set(threshold);
        }
        if let Some(window_days) = update.window_days {
            model.window_days = Set(window_days);
        }
        if let Some(points) = update.points {
            model.points = Set(points);
        }
        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }
        if let Some(active) = update.active {
            model.active = Set(active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新积分规则", e))?;

        self.get_point_rule_by_id_impl(id).await
    }

    /// 删除规则，其建议随外键级联删除，已发放的流水保留
    pub async fn delete_point_rule_impl(&self, id: i64) -> Result<bool> {
        let result = PointRules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除积分规则失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn has_suggestion_since_impl(
        &self,
        rule_id: i64,
        student_id: i64,
        since: DateTime<Utc>,
    ) -> Result<bool> {
        let count = PointSuggestions::find()
            .filter(SuggestionColumn::RuleId.eq(rule_id))
            .filter(SuggestionColumn::StudentId.eq(student_id))
            .filter(SuggestionColumn::CreatedAt.gte(since.timestamp()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分建议失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_point_suggestions_impl(
        &self,
        suggestions: Vec<NewSuggestion>,
    ) -> Result<Vec<PointSuggestion>> {
        if suggestions.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let saved = SuggestionActiveModel {
                rule_id: Set(suggestion.rule_id),
                student_id: Set(suggestion.student_id),
                points: Set(suggestion.points),
                reason: Set(suggestion.reason),
                status: Set(SuggestionStatus::Pending.to_string()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| write_error("创建积分建议", e))?;
            created.push(saved.into_suggestion());
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    pub async fn get_point_suggestion_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<PointSuggestion>> {
        let result = PointSuggestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分建议失败: {e}")))?;

        Ok(result.map(|m| m.into_suggestion()))
    }

    pub async fn list_point_suggestions_with_pagination_impl(
        &self,
        query: SuggestionListQuery,
    ) -> Result<SuggestionListResponse> {
        let mut select = PointSuggestions::find();

        if let Some(student_ids) = query.student_ids {
            select = select.filter(SuggestionColumn::StudentId.is_in(student_ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(SuggestionColumn::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(SuggestionColumn::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(SuggestionColumn::CreatedAt)
            .order_by_desc(SuggestionColumn::Id);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "积分建议").await?;

        Ok(SuggestionListResponse {
            items: items.into_iter().map(|m| m.into_suggestion()).collect(),
            pagination,
        })
    }

    pub async fn count_pending_suggestions_impl(&self, student_ids: Option<Vec<i64>>) -> Result<u64> {
        let mut select = PointSuggestions::find()
            .filter(SuggestionColumn::Status.eq(SuggestionStatus::Pending.to_string()));
        if let Some(student_ids) = student_ids {
            select = select.filter(SuggestionColumn::StudentId.is_in(student_ids));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计积分建议失败: {e}")))
    }

    /// 审核通过：生成流水、调整余额并标记建议，全部在一个事务内
    pub async fn approve_point_suggestion_impl(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<(PointSuggestion, PointTransaction)>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(suggestion) = PointSuggestions::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分建议失败: {e}")))?
        else {
            return Ok(None);
        };

        if suggestion.status != SuggestionStatus::Pending.as_str() {
            return Err(SchoolHubError::conflict(format!(
                "积分建议已审核: {}",
                suggestion.status
            )));
        }

        let category = PointRules::find_by_id(suggestion.rule_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分规则失败: {e}")))?
            .and_then(|rule| rule.category.parse::<PointCategory>().ok())
            .unwrap_or(PointCategory::Other);

        let reviewed =
            mark_reviewed(&txn, suggestion.id, SuggestionStatus::Approved, reviewer_id).await?;

        let (transaction, _) = apply_transaction(
            &txn,
            NewPointTransaction {
                student_id: suggestion.student_id,
                points: suggestion.points,
                reason: suggestion.reason.clone(),
                category,
                awarded_by: Some(reviewer_id),
                rule_id: Some(suggestion.rule_id),
                suggestion_id: Some(suggestion.id),
            },
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((reviewed, transaction)))
    }

    pub async fn reject_point_suggestion_impl(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<PointSuggestion>> {
        let Some(suggestion) = PointSuggestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询积分建议失败: {e}")))?
        else {
            return Ok(None);
        };

        if suggestion.status != SuggestionStatus::Pending.as_str() {
            return Err(SchoolHubError::conflict(format!(
                "积分建议已审核: {}",
                suggestion.status
            )));
        }

        mark_reviewed(&self.db, suggestion.id, SuggestionStatus::Rejected, reviewer_id)
            .await
            .map(Some)
    }
}

/// 只有仍处于待审核状态的建议会被更新，否则返回 Conflict
async fn mark_reviewed<C>(
    conn: &C,
    id: i64,
    status: SuggestionStatus,
    reviewer_id: i64,
) -> Result<PointSuggestion>
where
    C: ConnectionTrait,
{
    let updated = PointSuggestions::update_many()
        .col_expr(SuggestionColumn::Status, Expr::value(status.to_string()))
        .col_expr(SuggestionColumn::ReviewedBy, Expr::value(reviewer_id))
        .col_expr(
            SuggestionColumn::ReviewedAt,
            Expr::value(Utc::now().timestamp()),
        )
        .filter(SuggestionColumn::Id.eq(id))
        .filter(SuggestionColumn::Status.eq(SuggestionStatus::Pending.to_string()))
        .exec(conn)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("更新积分建议失败: {e}")))?;

    if updated.rows_affected == 0 {
        return Err(SchoolHubError::conflict(format!("积分建议已审核: {id}")));
    }

    PointSuggestions::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("查询积分建议失败: {e}")))?
        .map(|m| m.into_suggestion())
        .ok_or_else(|| SchoolHubError::not_found(format!("积分建议不存在: {id}")))
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::errors::SchoolHubError;
    use crate::models::points::{
        entities::{PointCategory, RuleCondition, SuggestionStatus},
        requests::{
            CreatePointRuleRequest, NewPointTransaction, NewSuggestion, SuggestionListQuery,
            TransactionListQuery,
        },
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn award(student_id: i64, points: i32) -> NewPointTransaction {
        NewPointTransaction {
            student_id,
            points,
            reason: "Helped clean the library".to_string(),
            category: PointCategory::Behavior,
            awarded_by: None,
            rule_id: None,
            suggestion_id: None,
        }
    }

    fn rule(points: i32) -> CreatePointRuleRequest {
        CreatePointRuleRequest {
            name: "Perfect month".to_string(),
            description: None,
            condition: RuleCondition::PerfectAttendance,
            threshold: 0.0,
            window_days: 30,
            points,
            category: Some(PointCategory::Attendance),
            active: None,
        }
    }

    #[tokio::test]
    async fn test_balance_tracks_transactions() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-1", None).await;

        let (_, balance) = storage.create_point_transaction(award(student, 15)).await.unwrap();
        assert_eq!(balance, 15);
        let (_, balance) = storage.create_point_transaction(award(student, -5)).await.unwrap();
        assert_eq!(balance, 10);

        let err = storage
            .create_point_transaction(award(student, -11))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::InsufficientPoints(_)));

        let stored = storage.get_student_by_id(student).await.unwrap().unwrap();
        assert_eq!(stored.points, 10);

        let history = storage
            .list_point_transactions_with_pagination(TransactionListQuery {
                student_id: Some(student),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(history.pagination.total, 2);

        let err = storage
            .create_point_transaction(award(4242, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_deductions_never_overdraw() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-2", None).await;
        storage.create_point_transaction(award(student, 10)).await.unwrap();

        let (first, second) = tokio::join!(
            storage.create_point_transaction(award(student, -10)),
            storage.create_point_transaction(award(student, -10)),
        );
        assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
        let failed = if first.is_err() { first } else { second };
        assert!(matches!(failed, Err(SchoolHubError::InsufficientPoints(_))));

        let stored = storage.get_student_by_id(student).await.unwrap().unwrap();
        assert_eq!(stored.points, 0);
        let history = storage
            .list_point_transactions_with_pagination(TransactionListQuery {
                student_id: Some(student),
                ..Default::default()
            })
            .await
            .unwrap();
        let ledger_sum: i64 = history.items.iter().map(|t| i64::from(t.points)).sum();
        assert_eq!(ledger_sum, stored.points);
    }

    #[tokio::test]
    async fn test_guarded_balance_update() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-3", None).await;

        let err = super::apply_transaction(&storage.db, award(student, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::InsufficientPoints(_)));

        let (_, balance) = super::apply_transaction(&storage.db, award(student, 4))
            .await
            .unwrap();
        assert_eq!(balance, 4);
        let (_, balance) = super::apply_transaction(&storage.db, award(student, -4))
            .await
            .unwrap();
        assert_eq!(balance, 0);
    }

    #[tokio::test]
    async fn test_leaderboard_order() {
        let storage = test_support::storage().await;
        let a = test_support::student(&storage, "S-A", None).await;
        let b = test_support::student(&storage, "S-B", None).await;
        let c = test_support::student(&storage, "S-C", None).await;
        storage.create_point_transaction(award(a, 5)).await.unwrap();
        storage.create_point_transaction(award(b, 20)).await.unwrap();
        storage.create_point_transaction(award(c, 12)).await.unwrap();

        let top = storage.list_top_students_by_points(None, 2).await.unwrap();
        assert_eq!(top.iter().map(|s| s.id).collect::<Vec<_>>(), vec![b, c]);
    }

    #[tokio::test]
    async fn test_suggestion_review_flow() {
        let storage = test_support::storage().await;
        let reviewer = test_support::user(&storage, "teacher01", UserRole::Teacher).await;
        let student = test_support::student(&storage, "S-9", None).await;
        let rule = storage.create_point_rule(rule(8), Some(reviewer)).await.unwrap();
        assert!(rule.active);

        let since = chrono::Utc::now() - chrono::Duration::days(1);
        assert!(!storage.has_suggestion_since(rule.id, student, since).await.unwrap());

        let created = storage
            .create_point_suggestions(vec![
                NewSuggestion {
                    rule_id: rule.id,
                    student_id: student,
                    points: 8,
                    reason: "Perfect attendance".to_string(),
                },
                NewSuggestion {
                    rule_id: rule.id,
                    student_id: student,
                    points: 8,
                    reason: "Perfect attendance again".to_string(),
                },
            ])
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert!(storage.has_suggestion_since(rule.id, student, since).await.unwrap());
        assert_eq!(storage.count_pending_suggestions(None).await.unwrap(), 2);

        let (approved, transaction) = storage
            .approve_point_suggestion(created[0].id, reviewer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, SuggestionStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(reviewer));
        assert_eq!(transaction.suggestion_id, Some(created[0].id));
        assert_eq!(transaction.category, PointCategory::Attendance);

        let err = storage
            .approve_point_suggestion(created[0].id, reviewer)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::Conflict(_)));

        let rejected = storage
            .reject_point_suggestion(created[1].id, reviewer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rejected.status, SuggestionStatus::Rejected);

        let student = storage.get_student_by_id(student).await.unwrap().unwrap();
        assert_eq!(student.points, 8);
        assert_eq!(
            storage
                .list_point_suggestions_with_pagination(SuggestionListQuery {
                    status: Some(SuggestionStatus::Pending),
                    ..Default::default()
                })
                .await
                .unwrap()
                .pagination
                .total,
            0
        );
        assert!(storage.approve_point_suggestion(9999, reviewer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_review_only_claims_pending_suggestion() {
        let storage = test_support::storage().await;
        let reviewer = test_support::user(&storage, "teacher03", UserRole::Teacher).await;
        let student = test_support::student(&storage, "S-11", None).await;
        let rule = storage.create_point_rule(rule(6), Some(reviewer)).await.unwrap();
        let created = storage
            .create_point_suggestions(vec![NewSuggestion {
                rule_id: rule.id,
                student_id: student,
                points: 6,
                reason: "Perfect attendance".to_string(),
            }])
            .await
            .unwrap();
        let id = created[0].id;

        // 另一位审核人已经通过，再次标记必须失败
        storage.approve_point_suggestion(id, reviewer).await.unwrap();
        let err = super::mark_reviewed(&storage.db, id, SuggestionStatus::Rejected, reviewer)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::Conflict(_)));

        let (first, second) = tokio::join!(
            storage.approve_point_suggestion(id, reviewer),
            storage.reject_point_suggestion(id, reviewer),
        );
        assert!(matches!(first, Err(SchoolHubError::Conflict(_))));
        assert!(matches!(second, Err(SchoolHubError::Conflict(_))));

        let stored = storage.get_point_suggestion_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Approved);
        let balance = storage.get_student_by_id(student).await.unwrap().unwrap().points;
        assert_eq!(balance, 6);
    }

    #[tokio::test]
    async fn test_rejected_negative_suggestion_keeps_balance() {
        let storage = test_support::storage().await;
        let reviewer = test_support::user(&storage, "teacher02", UserRole::Teacher).await;
        let student = test_support::student(&storage, "S-10", None).await;
        let rule = storage.create_point_rule(rule(-3), Some(reviewer)).await.unwrap();
        let created = storage
            .create_point_suggestions(vec![NewSuggestion {
                rule_id: rule.id,
                student_id: student,
                points: -3,
                reason: "Late streak".to_string(),
            }])
            .await
            .unwrap();

        let err = storage
            .approve_point_suggestion(created[0].id, reviewer)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::InsufficientPoints(_)));

        let still_pending = storage
            .get_point_suggestion_by_id(created[0].id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(still_pending.status, SuggestionStatus::Pending);
    }
}
