use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::format_date;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::students::{
    entities::{Student, StudentStatus},
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    responses::StudentListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now();
        let enrolled_on = req.enrolled_on.unwrap_or_else(|| now.date_naive());

        let model = ActiveModel {
            user_id: Set(req.user_id),
            parent_user_id: Set(req.parent_user_id),
            student_number: Set(req.student_number.trim().to_string()),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            gender: Set(req.gender.to_string()),
            date_of_birth: Set(req.date_of_birth.map(format_date)),
            class_id: Set(req.class_id),
            guardian_name: Set(req.guardian_name),
            guardian_phone: Set(req.guardian_phone),
            address: Set(req.address),
            status: Set(StudentStatus::Active.to_string()),
            points: Set(0),
            enrolled_on: Set(format_date(enrolled_on)),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建学生", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_by_parent_impl(&self, parent_user_id: i64) -> Result<Vec<Student>> {
        self.list_students_where(Column::ParentUserId.eq(parent_user_id))
            .await
    }

    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_where(Column::ClassId.eq(class_id)).await
    }

    pub async fn list_active_students_impl(&self, class_id: Option<i64>) -> Result<Vec<Student>> {
        let mut cond = Condition::all().add(Column::Status.eq(StudentStatus::Active.to_string()));
        if let Some(class_id) = class_id {
            cond = cond.add(Column::ClassId.eq(class_id));
        }
        self.list_students_where(cond).await
    }

    async fn list_students_where<F>(&self, filter: F) -> Result<Vec<Student>>
    where
        F: sea_orm::sea_query::IntoCondition,
    {
        let models = Students::find()
            .filter(filter)
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find();

        if let Some(class_ids) = query.class_ids {
            select = select.filter(Column::ClassId.is_in(class_ids));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(parent_user_id) = query.parent_user_id {
            select = select.filter(Column::ParentUserId.eq(parent_user_id));
        }
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
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
                    .add(Column::StudentNumber.like(contains_pattern(search))),
            );
        }

        select = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName);

        let (students, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "学生").await?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination,
        })
    }

    /// 更新学生档案（积分余额只能通过积分流水变动）
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
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
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(format_date(date_of_birth)));
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(parent_user_id) = update.parent_user_id {
            model.parent_user_id = Set(Some(parent_user_id));
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(Some(guardian_name));
        }
        if let Some(guardian_phone) = update.guardian_phone {
            model.guardian_phone = Set(Some(guardian_phone));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新学生", e))?;

        self.get_student_by_id_impl(id).await
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_students_impl(&self, class_id: Option<i64>) -> Result<u64> {
        let mut select = Students::find();
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        select
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计学生数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{self, new_student};
    use crate::errors::SchoolHubError;
    use crate::models::students::{
        entities::StudentStatus,
        requests::{StudentListQuery, UpdateStudentRequest},
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_create_defaults_and_duplicate_number() {
        let storage = test_support::storage().await;
        let student = storage
            .create_student(new_student(" S-001 ", "Esther", "Kollie"))
            .await
            .unwrap();
        assert_eq!(student.student_number, "S-001");
        assert_eq!(student.points, 0);
        assert_eq!(student.status, StudentStatus::Active);
        assert_eq!(student.enrolled_on, chrono::Utc::now().date_naive());

        let err = storage
            .create_student(new_student("S-001", "Other", "Person"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_parent_link_and_search() {
        let storage = test_support::storage().await;
        let parent = test_support::user(&storage, "parent01", UserRole::Parent).await;

        let mut req = new_student("S-010", "Moses", "Flomo");
        req.parent_user_id = Some(parent);
        let child = storage.create_student(req).await.unwrap();
        storage
            .create_student(new_student("S-011", "Grace", "Tubman"))
            .await
            .unwrap();

        let children = storage.list_students_by_parent(parent).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child.id);
        assert!(child.is_linked_to(parent));

        let found = storage
            .list_students_with_pagination(StudentListQuery {
                search: Some("tub".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].first_name, "Grace");
    }

    #[tokio::test]
    async fn test_unknown_class_rejected() {
        let storage = test_support::storage().await;
        let mut req = new_student("S-020", "Joseph", "Boakai");
        req.class_id = Some(404);
        let err = storage.create_student(req).await.unwrap_err();
        assert!(matches!(err, SchoolHubError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_and_active_filter() {
        let storage = test_support::storage().await;
        let a = storage
            .create_student(new_student("S-030", "Ama", "Sirleaf"))
            .await
            .unwrap();
        storage
            .create_student(new_student("S-031", "Kofi", "Weah"))
            .await
            .unwrap();

        let updated = storage
            .update_student(
                a.id,
                UpdateStudentRequest {
                    status: Some(StudentStatus::Graduated),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, StudentStatus::Graduated);

        let active = storage.list_active_students(None).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].first_name, "Kofi");
        assert_eq!(storage.count_students(None).await.unwrap(), 2);

        assert!(storage.delete_student(a.id).await.unwrap());
        assert!(storage.get_student_by_id(a.id).await.unwrap().is_none());
    }
}
