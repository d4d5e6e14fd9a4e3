pub mod overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

storage_service!(DashboardService);

impl DashboardService {
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::get_dashboard(self, request).await
    }
}
