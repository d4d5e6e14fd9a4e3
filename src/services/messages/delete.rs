use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_error};

pub async fn delete_message(
    service: &MessageService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match service
        .get_storage(request)
        .delete_message_for_user(id, user.id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
        Err(e) => Ok(storage_error("Failed to delete message", e)),
    }
}
