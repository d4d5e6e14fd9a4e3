//! 班级存储操作
//!
//! 任课教师以 JSON 列表保存在班级记录上，按教师筛选在内存中完成。

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::format_id_list;
use crate::errors::{Result, SchoolHubError};
use crate::models::classes::{
    entities::SchoolClass,
    requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    responses::ClassListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            grade_level: Set(req.grade_level.trim().to_string()),
            section: Set(req.section),
            academic_year: Set(req.academic_year),
            teacher_ids: Set(format_id_list(&req.teacher_ids)),
            subject_ids: Set(format_id_list(&req.subject_ids)),
            room: Set(req.room),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建班级", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 教师任教的班级
    pub async fn list_classes_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<SchoolClass>> {
        let models = Classes::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_class())
            .filter(|class| class.has_teacher(teacher_id))
            .collect())
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let mut select = Classes::find();

        if let Some(teacher_id) = query.teacher_id {
            let ids: Vec<i64> = self
                .list_classes_by_teacher_impl(teacher_id)
                .await?
                .into_iter()
                .map(|class| class.id)
                .collect();
            select = select.filter(Column::Id.is_in(ids));
        }

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }

        select = select.order_by_asc(Column::Name);

        let (classes, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "班级").await?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination,
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level.trim().to_string());
        }
        if let Some(section) = update.section {
            model.section = Set(Some(section));
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(teacher_ids) = update.teacher_ids {
            model.teacher_ids = Set(format_id_list(&teacher_ids));
        }
        if let Some(subject_ids) = update.subject_ids {
            model.subject_ids = Set(format_id_list(&subject_ids));
        }
        if let Some(room) = update.room {
            model.room = Set(Some(room));
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新班级", e))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，学生的班级字段由外键置空
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计班级数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::errors::SchoolHubError;
    use crate::models::classes::requests::{
        ClassListQuery, CreateClassRequest, UpdateClassRequest,
    };
    use crate::storage::Storage;

    fn new_class(name: &str, teacher_ids: Vec<i64>) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            grade_level: "10".to_string(),
            section: Some("A".to_string()),
            academic_year: "2025/2026".to_string(),
            teacher_ids,
            subject_ids: vec![],
            room: None,
            capacity: Some(40),
        }
    }

    #[tokio::test]
    async fn test_filter_by_teacher() {
        let storage = test_support::storage().await;
        storage.create_class(new_class("10A", vec![1, 2])).await.unwrap();
        storage.create_class(new_class("10B", vec![2])).await.unwrap();
        storage.create_class(new_class("11A", vec![3])).await.unwrap();

        let mine = storage.list_classes_by_teacher(2).await.unwrap();
        assert_eq!(
            mine.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["10A", "10B"]
        );

        let page = storage
            .list_classes_with_pagination(ClassListQuery {
                teacher_id: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].name, "11A");

        let none = storage
            .list_classes_with_pagination(ClassListQuery {
                teacher_id: Some(99),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.items.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_and_delete_unlinks_students() {
        let storage = test_support::storage().await;
        let class = storage.create_class(new_class("12C", vec![])).await.unwrap();
        let err = storage.create_class(new_class("12C", vec![])).await.unwrap_err();
        assert!(matches!(err, SchoolHubError::Conflict(_)));

        let student_id = test_support::student(&storage, "S-900", Some(class.id)).await;
        assert_eq!(storage.count_students(Some(class.id)).await.unwrap(), 1);

        let updated = storage
            .update_class(
                class.id,
                UpdateClassRequest {
                    teacher_ids: Some(vec![5]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.has_teacher(5));

        assert!(storage.delete_class(class.id).await.unwrap());
        let student = storage.get_student_by_id(student_id).await.unwrap().unwrap();
        assert_eq!(student.class_id, None);
    }
}
