//! 考勤存储操作
//!
//! 同一学生同一天只有一条记录，重复登记覆盖原记录。

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::format_date;
use crate::errors::{Result, SchoolHubError};
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{AttendanceListQuery, AttendanceUpsert},
    responses::AttendanceListResponse,
};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 单条 INSERT ... ON CONFLICT 写入，并发首次登记同样以最后一次为准
async fn upsert_in<C>(conn: &C, record: AttendanceUpsert) -> Result<AttendanceRecord>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().timestamp();
    let date = format_date(record.date);

    let mut update_columns = vec![
        Column::Status,
        Column::Note,
        Column::RecordedBy,
        Column::UpdatedAt,
    ];
    // 未指定班级时保留原记录的班级
    if record.class_id.is_some() {
        update_columns.push(Column::ClassId);
    }

    Attendance::insert(ActiveModel {
        student_id: Set(record.student_id),
        class_id: Set(record.class_id),
        date: Set(date.clone()),
        status: Set(record.status.to_string()),
        note: Set(record.note),
        recorded_by: Set(record.recorded_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([Column::StudentId, Column::Date])
            .update_columns(update_columns)
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await
    .map_err(|e| write_error("登记考勤", e))?;

    Attendance::find()
        .filter(Column::StudentId.eq(record.student_id))
        .filter(Column::Date.eq(date.as_str()))
        .one(conn)
        .await
        .map_err(|e| SchoolHubError::database_operation(format!("查询考勤失败: {e}")))?
        .map(|m| m.into_record())
        .ok_or_else(|| {
            SchoolHubError::database_operation(format!(
                "考勤写入后未找到记录: 学生 {} 日期 {}",
                record.student_id, date
            ))
        })
}

impl SeaOrmStorage {
    pub async fn upsert_attendance_impl(&self, record: AttendanceUpsert) -> Result<AttendanceRecord> {
        upsert_in(&self.db, record).await
    }

    /// 批量登记，任一条失败则全部回滚
    pub async fn upsert_attendance_batch_impl(
        &self,
        records: Vec<AttendanceUpsert>,
    ) -> Result<Vec<AttendanceRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(upsert_in(&txn, record).await?);
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let mut select = Attendance::find();

        if let Some(student_ids) = query.student_ids {
            select = select.filter(Column::StudentId.is_in(student_ids));
        }
        if let Some(class_ids) = query.class_ids {
            select = select.filter(Column::ClassId.is_in(class_ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::Date).order_by_asc(Column::StudentId);

        let (records, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "考勤").await?;

        Ok(AttendanceListResponse {
            items: records.into_iter().map(|m| m.into_record()).collect(),
            pagination,
        })
    }

    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find().filter(Column::StudentId.eq(student_id));
        if let Some(from) = from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }
        if let Some(to) = to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }

        let models = select
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_record()).collect())
    }

    pub async fn list_attendance_since_impl(
        &self,
        student_ids: &[i64],
        since: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Attendance::find()
            .filter(Column::StudentId.is_in(student_ids.to_vec()))
            .filter(Column::Date.gte(format_date(since)))
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_record()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::attendance::{
        entities::AttendanceStatus,
        requests::{AttendanceListQuery, AttendanceUpsert},
    };
    use crate::models::classes::requests::CreateClassRequest;
    use crate::storage::Storage;
    use chrono::NaiveDate;

    fn entry(student_id: i64, day: u32, status: AttendanceStatus) -> AttendanceUpsert {
        AttendanceUpsert {
            student_id,
            class_id: None,
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            status,
            note: None,
            recorded_by: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_day() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-1", None).await;

        let first = storage
            .upsert_attendance(entry(student, 8, AttendanceStatus::Absent))
            .await
            .unwrap();
        let second = storage
            .upsert_attendance(entry(student, 8, AttendanceStatus::Late))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);

        let all = storage.list_student_attendance(student, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_recordings_last_write_wins() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-4", None).await;

        let (first, second) = tokio::join!(
            storage.upsert_attendance(entry(student, 15, AttendanceStatus::Absent)),
            storage.upsert_attendance(entry(student, 15, AttendanceStatus::Present)),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(first.id, second.id);

        let all = storage.list_student_attendance(student, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn test_upsert_keeps_class_when_omitted() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-5", None).await;
        let class = storage
            .create_class(CreateClassRequest {
                name: "Grade 9A".to_string(),
                grade_level: "9".to_string(),
                section: None,
                academic_year: "2025/2026".to_string(),
                teacher_ids: Vec::new(),
                subject_ids: Vec::new(),
                room: None,
                capacity: None,
            })
            .await
            .unwrap();

        let mut with_class = entry(student, 16, AttendanceStatus::Late);
        with_class.class_id = Some(class.id);
        storage.upsert_attendance(with_class).await.unwrap();

        let updated = storage
            .upsert_attendance(entry(student, 16, AttendanceStatus::Excused))
            .await
            .unwrap();
        assert_eq!(updated.status, AttendanceStatus::Excused);
        assert_eq!(updated.class_id, Some(class.id));
    }

    #[tokio::test]
    async fn test_batch_rolls_back_on_failure() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-2", None).await;

        let result = storage
            .upsert_attendance_batch(vec![
                entry(student, 10, AttendanceStatus::Present),
                entry(9999, 10, AttendanceStatus::Present),
            ])
            .await;
        assert!(result.is_err());
        assert!(
            storage
                .list_student_attendance(student, None, None)
                .await
                .unwrap()
                .is_empty()
        );

        let saved = storage
            .upsert_attendance_batch(vec![
                entry(student, 10, AttendanceStatus::Present),
                entry(student, 11, AttendanceStatus::Excused),
            ])
            .await
            .unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[tokio::test]
    async fn test_date_range_filters() {
        let storage = test_support::storage().await;
        let student = test_support::student(&storage, "S-3", None).await;
        for day in [1, 2, 3, 4] {
            storage
                .upsert_attendance(entry(student, day, AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let ranged = storage
            .list_student_attendance(
                student,
                NaiveDate::from_ymd_opt(2025, 9, 2),
                NaiveDate::from_ymd_opt(2025, 9, 3),
            )
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);

        let page = storage
            .list_attendance_with_pagination(AttendanceListQuery {
                student_ids: Some(vec![student]),
                from: NaiveDate::from_ymd_opt(2025, 9, 3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].date, NaiveDate::from_ymd_opt(2025, 9, 4).unwrap());

        let since = storage
            .list_attendance_since(&[student], NaiveDate::from_ymd_opt(2025, 9, 4).unwrap())
            .await
            .unwrap();
        assert_eq!(since.len(), 1);
    }
}
