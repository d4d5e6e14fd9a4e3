use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::ApiResponse;
use crate::models::messages::{
    entities::Mailbox,
    requests::{MessageListParams, MessageListQuery},
    responses::UnreadCountResponse,
};
use crate::services::common::{current_user, storage_error};

pub async fn list_messages(
    service: &MessageService,
    mailbox: Mailbox,
    params: MessageListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let (page, size) = params.pagination.normalized();
    let query = MessageListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        user_id: user.id,
        mailbox,
        // 未读过滤只对收件箱有意义
        unread_only: mailbox == Mailbox::Inbox && params.unread_only.unwrap_or(false),
    };

    match service
        .get_storage(request)
        .list_messages_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Messages retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve messages", e)),
    }
}

pub async fn unread_count(
    service: &MessageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match service
        .get_storage(request)
        .count_unread_messages(user.id)
        .await
    {
        Ok(unread) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread },
            "Unread count retrieved",
        ))),
        Err(e) => Ok(storage_error("Failed to count unread messages", e)),
    }
}
