//! HTTP handlers for the strain database

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{ImportSummary, StrainAverage, StrainQuery};
use crate::services::StrainService;
use crate::AppState;

/// List strain averages
pub async fn list_strains(
    State(state): State<AppState>,
    Query(query): Query<StrainQuery>,
) -> AppResult<Json<Vec<StrainAverage>>> {
    let service = StrainService::new(state.db);
    let strains = service.list_strains(&query).await?;
    Ok(Json(strains))
}

/// Import the bundled example strains
pub async fn import_example_strains(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ImportSummary>> {
    let service = StrainService::new(state.db);
    let summary = service.import_examples(current_user.user_id()).await?;
    Ok(Json(summary))
}
