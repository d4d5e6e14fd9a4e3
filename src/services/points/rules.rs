use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PointService;
use crate::models::points::{
    requests::{
        CreatePointRuleRequest, PointRuleListParams, PointRuleListQuery, UpdatePointRuleRequest,
    },
    responses::PointRuleResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, not_found, storage_error, trimmed};
use crate::utils::validate::validate_required;

const MAX_WINDOW_DAYS: i32 = 366;

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), String> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err("Threshold must be a non-negative number".to_string())
    }
}

pub(crate) fn validate_window(window_days: i32) -> Result<(), String> {
    if (1..=MAX_WINDOW_DAYS).contains(&window_days) {
        Ok(())
    } else {
        Err(format!("Window must be between 1 and {MAX_WINDOW_DAYS} days"))
    }
}

pub(crate) fn validate_rule_points(points: i32) -> Result<(), String> {
    if points == 0 {
        Err("Rule points must not be zero".to_string())
    } else {
        Ok(())
    }
}

pub async fn list_rules(
    service: &PointService,
    params: PointRuleListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (page, size) = params.pagination.normalized();
    let query = PointRuleListQuery {
        page: Some(page as i64),
        size: Some(size as i64),
        active: params.active,
    };

    match service
        .get_storage(request)
        .list_point_rules_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Point rules retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve point rules", e)),
    }
}

pub async fn get_rule(
    service: &PointService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_point_rule_by_id(id).await {
        Ok(Some(rule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PointRuleResponse { rule },
            "Point rule retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PointRuleNotFound, "Point rule not found")),
        Err(e) => Ok(storage_error("Failed to load point rule", e)),
    }
}

pub async fn create_rule(
    service: &PointService,
    mut data: CreatePointRuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    data.name = data.name.trim().to_string();
    data.description = trimmed(data.description);
    let checks = validate_required("name", &data.name, 128)
        .and(validate_threshold(data.threshold))
        .and(validate_window(data.window_days))
        .and(validate_rule_points(data.points));
    if let Err(msg) = checks {
        return Ok(bad_request(ErrorCode::PointRuleInvalid, msg));
    }

    match service
        .get_storage(request)
        .create_point_rule(data, Some(user.id))
        .await
    {
        Ok(rule) => {
            info!("Point rule {} ({}) created by {}", rule.id, rule.name, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                PointRuleResponse { rule },
                "Point rule created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Point rule creation failed", e)),
    }
}

pub async fn update_rule(
    service: &PointService,
    id: i64,
    mut data: UpdatePointRuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref name) = data.name {
        let name = name.trim().to_string();
        if let Err(msg) = validate_required("name", &name, 128) {
            return Ok(bad_request(ErrorCode::PointRuleInvalid, msg));
        }
        data.name = Some(name);
    }
    let checks = data
        .threshold
        .map_or(Ok(()), validate_threshold)
        .and(data.window_days.map_or(Ok(()), validate_window))
        .and(data.points.map_or(Ok(()), validate_rule_points));
    if let Err(msg) = checks {
        return Ok(bad_request(ErrorCode::PointRuleInvalid, msg));
    }

    match service
        .get_storage(request)
        .update_point_rule(id, data)
        .await
    {
        Ok(Some(rule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PointRuleResponse { rule },
            "Point rule updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PointRuleNotFound, "Point rule not found")),
        Err(e) => Ok(storage_error("Point rule update failed", e)),
    }
}

pub async fn delete_rule(
    service: &PointService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).delete_point_rule(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Point rule deleted"))),
        Ok(false) => Ok(not_found(ErrorCode::PointRuleNotFound, "Point rule not found")),
        Err(e) => Ok(storage_error("Point rule deletion failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_validation() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(95.5).is_ok());
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());

        assert!(validate_window(1).is_ok());
        assert!(validate_window(0).is_err());
        assert!(validate_window(400).is_err());

        assert!(validate_rule_points(-5).is_ok());
        assert!(validate_rule_points(0).is_err());
    }
}
