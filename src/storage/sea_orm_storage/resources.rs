use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::resources::{ActiveModel, Column, Entity as Resources};
use crate::errors::{Result, SchoolHubError};
use crate::models::resources::{
    entities::{DocumentResource, ResourceVisibility},
    requests::{CreateResourceRequest, ResourceListQuery, UpdateResourceRequest},
    responses::ResourceListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_resource_impl(
        &self,
        resource: CreateResourceRequest,
        uploaded_by: i64,
    ) -> Result<DocumentResource> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(resource.title.trim().to_string()),
            description: Set(resource.description),
            category: Set(resource.category.to_string()),
            url: Set(resource.url.trim().to_string()),
            class_id: Set(resource.class_id),
            subject_id: Set(resource.subject_id),
            visibility: Set(resource
                .visibility
                .unwrap_or(ResourceVisibility::All)
                .to_string()),
            uploaded_by: Set(uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建资料", e))?;

        Ok(result.into_resource())
    }

    pub async fn get_resource_by_id_impl(&self, id: i64) -> Result<Option<DocumentResource>> {
        let result = Resources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_resource()))
    }

    pub async fn list_resources_with_pagination_impl(
        &self,
        query: ResourceListQuery,
    ) -> Result<ResourceListResponse> {
        let mut select = Resources::find();

        if let Some(visibilities) = query.visibilities {
            select = select.filter(
                Column::Visibility.is_in(visibilities.iter().map(|v| v.to_string())),
            );
        }
        if let Some(category) = query.category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(contains_pattern(search)))
                    .add(Column::Description.like(contains_pattern(search))),
            );
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "资料").await?;

        Ok(ResourceListResponse {
            items: items.into_iter().map(|m| m.into_resource()).collect(),
            pagination,
        })
    }

    pub async fn update_resource_impl(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<DocumentResource>> {
        if self.get_resource_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

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
        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }
        if let Some(url) = update.url {
            model.url = Set(url.trim().to_string());
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(Some(subject_id));
        }
        if let Some(visibility) = update.visibility {
            model.visibility = Set(visibility.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新资料", e))?;

        self.get_resource_by_id_impl(id).await
    }

    pub async fn delete_resource_impl(&self, id: i64) -> Result<bool> {
        let result = Resources::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::resources::{
        entities::{ResourceCategory, ResourceVisibility},
        requests::{CreateResourceRequest, ResourceListQuery},
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn resource(title: &str, visibility: Option<ResourceVisibility>) -> CreateResourceRequest {
        CreateResourceRequest {
            title: title.to_string(),
            description: Some("Term one material".to_string()),
            category: ResourceCategory::Worksheet,
            url: "https://docs.school.lr/file.pdf".to_string(),
            class_id: None,
            subject_id: None,
            visibility,
        }
    }

    #[tokio::test]
    async fn test_visibility_filter() {
        let storage = test_support::storage().await;
        let teacher = test_support::user(&storage, "teacher01", UserRole::Teacher).await;

        let public = storage
            .create_resource(resource("Fractions worksheet", None), teacher)
            .await
            .unwrap();
        assert_eq!(public.visibility, ResourceVisibility::All);
        storage
            .create_resource(
                resource("Staff grading policy", Some(ResourceVisibility::Staff)),
                teacher,
            )
            .await
            .unwrap();
        storage
            .create_resource(
                resource("Parent consent form", Some(ResourceVisibility::Parents)),
                teacher,
            )
            .await
            .unwrap();

        let for_students = storage
            .list_resources_with_pagination(ResourceListQuery {
                visibilities: Some(ResourceVisibility::visible_for(&UserRole::Student).to_vec()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_students.items.len(), 1);
        assert_eq!(for_students.items[0].id, public.id);

        let for_staff = storage
            .list_resources_with_pagination(ResourceListQuery {
                visibilities: Some(ResourceVisibility::visible_for(&UserRole::Teacher).to_vec()),
                search: Some("policy".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_staff.items.len(), 1);
    }
}
