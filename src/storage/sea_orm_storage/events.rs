//! 校历事件存储操作
//!
//! 学期与学年由开始日期推导，写入时一并保存以便筛选。

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::entity::format_date;
use crate::errors::{Result, SchoolHubError};
use crate::models::events::{
    entities::{SchoolEvent, academic_year_label, academic_year_start_for, term_for_month},
    requests::{EventListQuery, NewEvent, UpdateEventRequest},
    responses::EventListResponse,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

fn derived_term(start: NaiveDate) -> (Option<i32>, Option<String>) {
    (
        term_for_month(start.month()),
        Some(academic_year_label(academic_year_start_for(start))),
    )
}

async fn insert_event<C>(conn: &C, event: NewEvent) -> Result<SchoolEvent>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().timestamp();
    let (term, academic_year) = derived_term(event.start_date);

    let model = ActiveModel {
        title: Set(event.title.trim().to_string()),
        description: Set(event.description),
        event_type: Set(event.event_type.to_string()),
        start_date: Set(format_date(event.start_date)),
        end_date: Set(format_date(event.end_date.max(event.start_date))),
        all_day: Set(event.all_day),
        term: Set(term),
        academic_year: Set(academic_year),
        source: Set(event.source.to_string()),
        created_by: Set(event.created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| write_error("创建事件", e))?;

    Ok(result.into_event())
}

impl SeaOrmStorage {
    pub async fn create_event_impl(&self, event: NewEvent) -> Result<SchoolEvent> {
        insert_event(&self.db, event).await
    }

    /// 同标题同开始日期的事件视为已存在
    pub async fn create_events_if_absent_impl(
        &self,
        events: Vec<NewEvent>,
    ) -> Result<(Vec<SchoolEvent>, usize)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::new();
        let mut skipped = 0;
        for event in events {
            let exists = Events::find()
                .filter(Column::Title.eq(event.title.trim()))
                .filter(Column::StartDate.eq(format_date(event.start_date)))
                .count(&txn)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("查询事件失败: {e}")))?
                > 0;
            if exists {
                skipped += 1;
                continue;
            }
            created.push(insert_event(&txn, event).await?);
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((created, skipped))
    }

    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<SchoolEvent>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询事件失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    pub async fn list_events_with_pagination_impl(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        let mut select = Events::find();

        // 与区间有交集即返回
        if let Some(from) = query.from {
            select = select.filter(Column::EndDate.gte(format_date(from)));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::StartDate.lte(format_date(to)));
        }
        if let Some(event_type) = query.event_type {
            select = select.filter(Column::EventType.eq(event_type.to_string()));
        }
        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term));
        }
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        select = select
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "事件").await?;

        Ok(EventListResponse {
            items: items.into_iter().map(|m| m.into_event()).collect(),
            pagination,
        })
    }

    pub async fn list_events_between_impl(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SchoolEvent>> {
        let models = Events::find()
            .filter(Column::EndDate.gte(format_date(from)))
            .filter(Column::StartDate.lte(format_date(to)))
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询事件失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_event()).collect())
    }

    pub async fn update_event_impl(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<SchoolEvent>> {
        let Some(existing) = self.get_event_by_id_impl(id).await? else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(event_type) = update.event_type {
            model.event_type = Set(event_type.to_string());
        }
        if let Some(all_day) = update.all_day {
            model.all_day = Set(all_day);
        }

        let start = update.start_date.unwrap_or(existing.start_date);
        let end = update.end_date.unwrap_or(existing.end_date);
        if update.start_date.is_some() {
            let (term, academic_year) = derived_term(start);
            model.start_date = Set(format_date(start));
            model.term = Set(term);
            model.academic_year = Set(academic_year);
        }
        if update.start_date.is_some() || update.end_date.is_some() {
            model.end_date = Set(format_date(end.max(start)));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新事件", e))?;

        self.get_event_by_id_impl(id).await
    }

    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除事件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::events::{
        entities::{EventSource, EventType},
        requests::{EventListQuery, NewEvent, UpdateEventRequest},
    };
    use crate::storage::Storage;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, start: NaiveDate, end: NaiveDate) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: None,
            event_type: EventType::Holiday,
            start_date: start,
            end_date: end,
            all_day: true,
            source: EventSource::Manual,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_term_and_year_are_derived() {
        let storage = test_support::storage().await;
        let armistice = storage
            .create_event(event("Armistice Day", date(2025, 11, 12), date(2025, 11, 12)))
            .await
            .unwrap();
        assert_eq!(armistice.term, Some(1));
        assert_eq!(armistice.academic_year.as_deref(), Some("2025/2026"));

        let break_week = storage
            .create_event(event("Break", date(2026, 8, 3), date(2026, 8, 1)))
            .await
            .unwrap();
        assert_eq!(break_week.term, None);
        assert_eq!(break_week.end_date, break_week.start_date);

        let moved = storage
            .update_event(
                armistice.id,
                UpdateEventRequest {
                    start_date: Some(date(2026, 2, 11)),
                    end_date: Some(date(2026, 2, 11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.term, Some(2));
        assert_eq!(moved.academic_year.as_deref(), Some("2025/2026"));
    }

    #[tokio::test]
    async fn test_overlap_query_and_dedupe() {
        let storage = test_support::storage().await;
        storage
            .create_event(event("Midterms", date(2025, 10, 20), date(2025, 10, 24)))
            .await
            .unwrap();
        storage
            .create_event(event("Sports day", date(2025, 11, 7), date(2025, 11, 7)))
            .await
            .unwrap();

        let overlapping = storage
            .list_events_between(date(2025, 10, 22), date(2025, 10, 31))
            .await
            .unwrap();
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].title, "Midterms");

        let (created, skipped) = storage
            .create_events_if_absent(vec![
                event("Sports day", date(2025, 11, 7), date(2025, 11, 7)),
                event("Thanksgiving", date(2025, 11, 6), date(2025, 11, 6)),
            ])
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(skipped, 1);

        let term_one = storage
            .list_events_with_pagination(EventListQuery {
                term: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(term_one.pagination.total, 3);
        assert_eq!(term_one.items[0].title, "Midterms");
    }
}
