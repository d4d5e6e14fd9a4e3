use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::{format_date, format_id_list};
use crate::errors::{Result, SchoolHubError};
use crate::models::teachers::{
    entities::{Teacher, TeacherStatus},
    requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    responses::TeacherListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            employee_number: Set(req.employee_number.trim().to_string()),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            email: Set(req.email),
            phone: Set(req.phone),
            subject_ids: Set(format_id_list(&req.subject_ids)),
            qualification: Set(req.qualification),
            status: Set(TeacherStatus::Active.to_string()),
            hired_on: Set(req.hired_on.map(format_date)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建教师", e))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Teacher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Teachers::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let mut select = Teachers::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.like(contains_pattern(search)))
                    .add(Column::LastName.like(contains_pattern(search)))
                    .add(Column::EmployeeNumber.like(contains_pattern(search))),
            );
        }

        select = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName);

        let (teachers, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "教师").await?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination,
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(subject_ids) = update.subject_ids {
            model.subject_ids = Set(format_id_list(&subject_ids));
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(Some(qualification));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(hired_on) = update.hired_on {
            model.hired_on = Set(Some(format_date(hired_on)));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新教师", e))?;

        self.get_teacher_by_id_impl(id).await
    }

    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计教师数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::teachers::{
        entities::TeacherStatus,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn new_teacher(number: &str, last: &str, user_id: Option<i64>) -> CreateTeacherRequest {
        CreateTeacherRequest {
            employee_number: number.to_string(),
            first_name: "Comfort".to_string(),
            last_name: last.to_string(),
            user_id,
            email: None,
            phone: None,
            subject_ids: vec![3, 1],
            qualification: Some("B.Ed".to_string()),
            hired_on: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_user() {
        let storage = test_support::storage().await;
        let user_id = test_support::user(&storage, "cdoe01", UserRole::Teacher).await;
        let teacher = storage
            .create_teacher(new_teacher("T-100", "Doe", Some(user_id)))
            .await
            .unwrap();
        assert_eq!(teacher.subject_ids, vec![3, 1]);
        assert_eq!(teacher.status, TeacherStatus::Active);

        let found = storage.get_teacher_by_user_id(user_id).await.unwrap().unwrap();
        assert_eq!(found.id, teacher.id);
        assert_eq!(found.full_name(), "Comfort Doe");
    }

    #[tokio::test]
    async fn test_list_update_and_by_ids() {
        let storage = test_support::storage().await;
        let a = storage
            .create_teacher(new_teacher("T-200", "Sando", None))
            .await
            .unwrap();
        let b = storage
            .create_teacher(new_teacher("T-201", "Kpoto", None))
            .await
            .unwrap();

        storage
            .update_teacher(
                b.id,
                UpdateTeacherRequest {
                    status: Some(TeacherStatus::OnLeave),
                    subject_ids: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let on_leave = storage
            .list_teachers_with_pagination(TeacherListQuery {
                status: Some(TeacherStatus::OnLeave),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(on_leave.items.len(), 1);
        assert!(on_leave.items[0].subject_ids.is_empty());

        let by_ids = storage.list_teachers_by_ids(&[a.id, b.id, 999]).await.unwrap();
        assert_eq!(by_ids.len(), 2);
        assert!(storage.list_teachers_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(storage.count_teachers().await.unwrap(), 2);
    }
}
