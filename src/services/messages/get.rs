use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::messages::responses::MessageResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_error};

/// 读取消息；调用者为收件人且未读时标记已读
///
/// `explicit` 为 true 时来自"标记已读"接口，发件人调用视为不存在。
pub async fn get_message(
    service: &MessageService,
    id: i64,
    explicit: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let message = match storage.get_message_by_id(id).await {
        Ok(Some(message)) if message.visible_to(user.id) => message,
        Ok(_) => return Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
        Err(e) => return Ok(storage_error("Failed to load message", e)),
    };

    let is_recipient = message.recipient_id == user.id;
    if explicit && !is_recipient {
        return Ok(not_found(ErrorCode::MessageNotFound, "Message not found"));
    }

    let message = if is_recipient && message.read_at.is_none() {
        match storage.mark_message_read(id, user.id).await {
            Ok(Some(updated)) => updated,
            Ok(None) => message,
            Err(e) => return Ok(storage_error("Failed to mark message as read", e)),
        }
    } else {
        message
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MessageResponse { message },
        if explicit {
            "Message marked as read"
        } else {
            "Message retrieved successfully"
        },
    )))
}
