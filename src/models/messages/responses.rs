use serde::Serialize;
use ts_rs::TS;

use super::entities::Message;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct MessageListResponse {
    pub items: Vec<Message>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct UnreadCountResponse {
    pub unread: u64,
}
