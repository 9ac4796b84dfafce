//! Dashboard handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::DashboardStats;
use crate::services::ReportingService;
use crate::AppState;

/// Get dashboard statistics
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let service = ReportingService::new(state.db);
    let stats = service.dashboard_stats().await?;
    Ok(Json(stats))
}
