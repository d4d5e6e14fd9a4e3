use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::responses::SystemInfoResponse};

pub async fn get_system_info(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let now = chrono::Utc::now();
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or(now);

    let response = SystemInfoResponse {
        system_name: config.app.system_name.clone(),
        school_name: config.school.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: (now - started_at).num_seconds().max(0),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System information retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test};

    #[actix_web::test]
    async fn test_system_info_reports_uptime() {
        let started = chrono::Utc::now() - chrono::Duration::seconds(90);
        let request = test::TestRequest::default()
            .app_data(web::Data::new(AppStartTime {
                start_datetime: started,
            }))
            .to_http_request();

        let response = get_system_info(&SystemService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["data"]["uptime_seconds"].as_i64().unwrap() >= 90);
        assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
    }
}
