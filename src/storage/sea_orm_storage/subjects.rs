use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolHubError};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    responses::SubjectListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(Subject::normalize_code(&req.code)),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            credits: Set(req.credits.unwrap_or(1)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建科目", e))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Subjects::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let mut select = Subjects::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(contains_pattern(search)))
                    .add(Column::Name.like(contains_pattern(search))),
            );
        }

        select = select.order_by_asc(Column::Code);

        let (subjects, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "科目").await?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination,
        })
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(Subject::normalize_code(&code));
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新科目", e))?;

        self.get_subject_by_id_impl(id).await
    }

    /// 删除科目，相关成绩随外键级联删除
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_subjects_impl(&self) -> Result<u64> {
        Subjects::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计科目数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::errors::SchoolHubError;
    use crate::models::subjects::requests::{CreateSubjectRequest, SubjectListQuery};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_code_is_normalized_and_unique() {
        let storage = test_support::storage().await;
        let subject = storage
            .create_subject(CreateSubjectRequest {
                code: " math101 ".to_string(),
                name: "Mathematics".to_string(),
                description: None,
                credits: None,
            })
            .await
            .unwrap();
        assert_eq!(subject.code, "MATH101");
        assert_eq!(subject.credits, 1);

        let err = storage
            .create_subject(CreateSubjectRequest {
                code: "MATH101".to_string(),
                name: "Maths again".to_string(),
                description: None,
                credits: Some(2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolHubError::Conflict(_)));

        let found = storage
            .list_subjects_with_pagination(SubjectListQuery {
                search: Some("mathem".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
    }
}
