//! 消息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub thread_id: String,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub read_at: Option<i64>,
    pub deleted_by_sender: bool,
    pub deleted_by_recipient: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message(self) -> crate::models::messages::entities::Message {
        use super::timestamp_to_datetime;
        use crate::models::messages::entities::Message;

        Message {
            id: self.id,
            thread_id: self.thread_id,
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            subject: self.subject,
            body: self.body,
            read_at: self.read_at.map(timestamp_to_datetime),
            created_at: timestamp_to_datetime(self.created_at),
            deleted_by_sender: self.deleted_by_sender,
            deleted_by_recipient: self.deleted_by_recipient,
        }
    }
}
