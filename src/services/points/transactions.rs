use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PointService;
use crate::models::points::{
    entities::PointCategory,
    requests::{
        CreateTransactionRequest, NewPointTransaction, TransactionListParams,
        TransactionListQuery,
    },
    responses::TransactionResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::resolve_scope;
use crate::services::common::{bad_request, current_user, forbidden, not_found, storage_error};
use crate::utils::validate::validate_required;

/// 奖励或扣减积分的数值校验
pub(crate) fn validate_award(points: i32, max_award: i32) -> Result<(), String> {
    if points == 0 {
        return Err("Points must not be zero".to_string());
    }
    if points.unsigned_abs() > max_award.unsigned_abs() {
        return Err(format!("Points must be within ±{max_award}"));
    }
    Ok(())
}

pub async fn create_transaction(
    service: &PointService,
    data: CreateTransactionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let max_award = service.get_config().school.max_point_award;
    if let Err(msg) = validate_award(data.points, max_award) {
        return Ok(bad_request(ErrorCode::PointTransactionInvalid, msg));
    }
    let reason = data.reason.trim().to_string();
    if let Err(msg) = validate_required("reason", &reason, 255) {
        return Ok(bad_request(ErrorCode::PointTransactionInvalid, msg));
    }

    let storage = service.get_storage(request);
    match storage.get_student_by_id(data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to load student", e)),
    }

    match resolve_scope(&storage, &user).await {
        Ok(scope) if scope.allows_student(data.student_id) => {}
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::Forbidden,
                "You can only award points to students in your classes",
            ));
        }
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    }

    let transaction = NewPointTransaction {
        student_id: data.student_id,
        points: data.points,
        reason,
        category: data.category.unwrap_or(PointCategory::Other),
        awarded_by: Some(user.id),
        rule_id: None,
        suggestion_id: None,
    };

    match storage.create_point_transaction(transaction).await {
        Ok((transaction, balance)) => {
            info!(
                "User {} changed points of student {} by {} (balance {})",
                user.id, transaction.student_id, transaction.points, balance
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TransactionResponse {
                    transaction,
                    balance,
                },
                "Points recorded",
            )))
        }
        Err(e) => Ok(storage_error("Failed to record points", e)),
    }
}

pub async fn list_transactions(
    service: &PointService,
    params: TransactionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let scope = match resolve_scope(&storage, &user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(storage_error("Failed to resolve scope", e)),
    };

    let (page, size) = params.pagination.normalized();
    let query = TransactionListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        student_ids: scope.student_ids(),
        student_id: params.student_id,
        category: params.category,
    };

    match storage.list_point_transactions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Point transactions retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve point transactions", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_award() {
        assert!(validate_award(10, 100).is_ok());
        assert!(validate_award(-100, 100).is_ok());
        assert!(validate_award(0, 100).is_err());
        assert!(validate_award(101, 100).is_err());
        assert!(validate_award(-101, 100).is_err());
    }
}
