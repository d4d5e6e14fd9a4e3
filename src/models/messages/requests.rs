use serde::Deserialize;
use ts_rs::TS;

use super::entities::Mailbox;
use crate::models::common::{PaginationQuery, deserialize_optional_parsed};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct SendMessageRequest {
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
    // 回复的消息ID
    pub reply_to: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct MessageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub unread_only: Option<bool>,
}

// 写入存储层的新消息
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub thread_id: String,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct MessageListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_id: i64,
    pub mailbox: Mailbox,
    pub unread_only: bool,
}
