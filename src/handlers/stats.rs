use actix_web::{HttpResponse, Result, web};

use crate::handlers::shared::ApiResponse;
use crate::services::{AppContext, stats};

/// Get dashboard statistics
pub async fn get_dashboard_stats(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let stats = stats::dashboard(&ctx).await?;
    Ok(ApiResponse::ok(stats))
}
