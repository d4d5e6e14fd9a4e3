use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::MessageService;
use crate::models::messages::{
    requests::{NewMessage, SendMessageRequest},
    responses::MessageResponse,
};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserStatus};
use crate::services::common::{bad_request, current_user, not_found, storage_error};
use crate::utils::validate::validate_required;

const MAX_SUBJECT_LENGTH: usize = 200;
const MAX_BODY_LENGTH: usize = 10_000;

pub async fn send_message(
    service: &MessageService,
    data: SendMessageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let subject = data.subject.trim().to_string();
    let body = data.body.trim().to_string();
    if let Err(msg) = validate_required("subject", &subject, MAX_SUBJECT_LENGTH)
        .and(validate_required("body", &body, MAX_BODY_LENGTH))
    {
        return Ok(bad_request(ErrorCode::MessageInvalid, msg));
    }
    if data.recipient_id == user.id {
        return Ok(bad_request(
            ErrorCode::MessageInvalid,
            "You cannot send a message to yourself",
        ));
    }

    let storage = service.get_storage(request);
    match storage.get_user_by_id(data.recipient_id).await {
        Ok(Some(recipient)) if recipient.status == UserStatus::Active => {}
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::MessageInvalid,
                "Recipient account is not active",
            ));
        }
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Recipient not found")),
        Err(e) => return Ok(storage_error("Failed to load recipient", e)),
    }

    // 回复沿用原会话；原消息不可见时视为不存在
    let thread_id = match data.reply_to {
        Some(parent_id) => match storage.get_message_by_id(parent_id).await {
            Ok(Some(parent)) if parent.visible_to(user.id) => parent.thread_id,
            Ok(_) => {
                return Ok(not_found(
                    ErrorCode::MessageNotFound,
                    "Message being replied to was not found",
                ));
            }
            Err(e) => return Ok(storage_error("Failed to load message", e)),
        },
        None => uuid::Uuid::new_v4().to_string(),
    };

    let message = NewMessage {
        thread_id,
        sender_id: user.id,
        recipient_id: data.recipient_id,
        subject,
        body,
    };

    match storage.create_message(message).await {
        Ok(message) => {
            debug!(
                "Message {} sent from {} to {}",
                message.id, message.sender_id, message.recipient_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MessageResponse { message },
                "Message sent",
            )))
        }
        Err(e) => Ok(storage_error("Failed to send message", e)),
    }
}
