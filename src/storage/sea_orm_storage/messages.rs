//! 站内消息存储操作
//!
//! 删除按发件/收件一侧标记，双方都删除后才移除记录。

use super::{SeaOrmStorage, fetch_page, write_error};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{Result, SchoolHubError};
use crate::models::messages::{
    entities::{Mailbox, Message},
    requests::{MessageListQuery, NewMessage},
    responses::MessageListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_message_impl(&self, message: NewMessage) -> Result<Message> {
        let model = ActiveModel {
            thread_id: Set(message.thread_id),
            sender_id: Set(message.sender_id),
            recipient_id: Set(message.recipient_id),
            subject: Set(message.subject),
            body: Set(message.body),
            read_at: Set(None),
            deleted_by_sender: Set(false),
            deleted_by_recipient: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("发送消息", e))?;

        Ok(result.into_message())
    }

    pub async fn get_message_by_id_impl(&self, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询消息失败: {e}")))?;

        Ok(result.map(|m| m.into_message()))
    }

    /// 收件箱或发件箱，已被该侧删除的消息不返回
    pub async fn list_messages_with_pagination_impl(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        let mut select = match query.mailbox {
            Mailbox::Inbox => Messages::find()
                .filter(Column::RecipientId.eq(query.user_id))
                .filter(Column::DeletedByRecipient.eq(false)),
            Mailbox::Sent => Messages::find()
                .filter(Column::SenderId.eq(query.user_id))
                .filter(Column::DeletedBySender.eq(false)),
        };

        if query.unread_only && query.mailbox == Mailbox::Inbox {
            select = select.filter(Column::ReadAt.is_null());
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (items, pagination) =
            fetch_page(&self.db, select, query.page, query.size, "消息").await?;

        Ok(MessageListResponse {
            items: items.into_iter().map(|m| m.into_message()).collect(),
            pagination,
        })
    }

    /// 收件人标记已读；非收件人不修改，对该用户不可见时返回 None
    pub async fn mark_message_read_impl(&self, id: i64, user_id: i64) -> Result<Option<Message>> {
        let Some(model) = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询消息失败: {e}")))?
        else {
            return Ok(None);
        };

        let message = model.clone().into_message();
        if !message.visible_to(user_id) {
            return Ok(None);
        }
        if model.recipient_id != user_id || model.read_at.is_some() {
            return Ok(Some(message));
        }

        let mut active: ActiveModel = model.into();
        active.read_at = Set(Some(chrono::Utc::now().timestamp()));
        let saved = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("标记消息已读失败: {e}")))?;

        Ok(Some(saved.into_message()))
    }

    pub async fn count_unread_messages_impl(&self, user_id: i64) -> Result<u64> {
        Messages::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::DeletedByRecipient.eq(false))
            .filter(Column::ReadAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计未读消息失败: {e}")))
    }

    pub async fn delete_message_for_user_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let Some(model) = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询消息失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut deleted_by_sender = model.deleted_by_sender;
        let mut deleted_by_recipient = model.deleted_by_recipient;
        let mut changed = false;
        if model.sender_id == user_id && !deleted_by_sender {
            deleted_by_sender = true;
            changed = true;
        }
        if model.recipient_id == user_id && !deleted_by_recipient {
            deleted_by_recipient = true;
            changed = true;
        }
        if !changed {
            return Ok(false);
        }

        if deleted_by_sender && deleted_by_recipient {
            Messages::delete_by_id(id)
                .exec(&self.db)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("删除消息失败: {e}")))?;
        } else {
            let mut active: ActiveModel = model.into();
            active.deleted_by_sender = Set(deleted_by_sender);
            active.deleted_by_recipient = Set(deleted_by_recipient);
            active
                .update(&self.db)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("删除消息失败: {e}")))?;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::messages::{
        entities::Mailbox,
        requests::{MessageListQuery, NewMessage},
    };
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn message(sender_id: i64, recipient_id: i64) -> NewMessage {
        NewMessage {
            thread_id: "thread-1".to_string(),
            sender_id,
            recipient_id,
            subject: "PTA meeting".to_string(),
            body: "See you on Friday.".to_string(),
        }
    }

    fn mailbox(user_id: i64, mailbox: Mailbox, unread_only: bool) -> MessageListQuery {
        MessageListQuery {
            page: None,
            size: None,
            user_id,
            mailbox,
            unread_only,
        }
    }

    #[tokio::test]
    async fn test_read_only_by_recipient() {
        let storage = test_support::storage().await;
        let teacher = test_support::user(&storage, "teacher01", UserRole::Teacher).await;
        let parent = test_support::user(&storage, "parent01", UserRole::Parent).await;
        let outsider = test_support::user(&storage, "parent02", UserRole::Parent).await;
        let sent = storage.create_message(message(teacher, parent)).await.unwrap();

        assert_eq!(storage.count_unread_messages(parent).await.unwrap(), 1);

        let by_sender = storage.mark_message_read(sent.id, teacher).await.unwrap().unwrap();
        assert!(by_sender.read_at.is_none());
        assert!(storage.mark_message_read(sent.id, outsider).await.unwrap().is_none());

        let read = storage.mark_message_read(sent.id, parent).await.unwrap().unwrap();
        assert!(read.read_at.is_some());
        assert_eq!(storage.count_unread_messages(parent).await.unwrap(), 0);

        let unread = storage
            .list_messages_with_pagination(mailbox(parent, Mailbox::Inbox, true))
            .await
            .unwrap();
        assert!(unread.items.is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_per_side() {
        let storage = test_support::storage().await;
        let teacher = test_support::user(&storage, "teacher01", UserRole::Teacher).await;
        let parent = test_support::user(&storage, "parent01", UserRole::Parent).await;
        let sent = storage.create_message(message(teacher, parent)).await.unwrap();

        assert!(storage.delete_message_for_user(sent.id, teacher).await.unwrap());
        assert!(!storage.delete_message_for_user(sent.id, teacher).await.unwrap());

        let outbox = storage
            .list_messages_with_pagination(mailbox(teacher, Mailbox::Sent, false))
            .await
            .unwrap();
        assert!(outbox.items.is_empty());
        let inbox = storage
            .list_messages_with_pagination(mailbox(parent, Mailbox::Inbox, false))
            .await
            .unwrap();
        assert_eq!(inbox.items.len(), 1);

        assert!(storage.delete_message_for_user(sent.id, parent).await.unwrap());
        assert!(storage.get_message_by_id(sent.id).await.unwrap().is_none());
    }
}
