pub mod delete;
pub mod get;
pub mod list;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::messages::{entities::Mailbox, requests::{MessageListParams, SendMessageRequest}};

storage_service!(MessageService);

impl MessageService {
    pub async fn send_message(
        &self,
        data: SendMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        send::send_message(self, data, request).await
    }

    pub async fn inbox(
        &self,
        query: MessageListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, Mailbox::Inbox, query, request).await
    }

    pub async fn sent(
        &self,
        query: MessageListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, Mailbox::Sent, query, request).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::unread_count(self, request).await
    }

    // 收件人打开时自动标记已读
    pub async fn get_message(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_message(self, id, false, request).await
    }

    pub async fn mark_read(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_message(self, id, true, request).await
    }

    pub async fn delete_message(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_message(self, id, request).await
    }
}
