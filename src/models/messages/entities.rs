use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 站内消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct Message {
    pub id: i64,
    // 会话ID（uuid），回复沿用原消息的会话
    pub thread_id: String,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip)]
    #[ts(skip)]
    pub deleted_by_sender: bool,
    #[serde(skip)]
    #[ts(skip)]
    pub deleted_by_recipient: bool,
}

impl Message {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// 对该用户是否仍可见（未被其一侧删除）
    pub fn visible_to(&self, user_id: i64) -> bool {
        (self.sender_id == user_id && !self.deleted_by_sender)
            || (self.recipient_id == user_id && !self.deleted_by_recipient)
    }
}

/// 邮箱视角
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mailbox {
    Inbox,
    Sent,
}
