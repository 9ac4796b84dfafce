//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{GradedReview, NewProduct, ProductDetail, UpcLookup};
use crate::services::CatalogService;
use crate::AppState;

/// Add a product to the catalog
pub async fn add_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<GradedReview>)> {
    let service = CatalogService::new(state.db);
    let product = service.add_product(current_user.user_id(), input).await?;
    Ok((StatusCode::CREATED, Json(GradedReview::from(product))))
}

/// Get a product with related reviews
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let service = CatalogService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Look up a product by barcode
pub async fn lookup_upc(
    State(state): State<AppState>,
    Path(upc_code): Path<String>,
) -> AppResult<Json<UpcLookup>> {
    let service = CatalogService::new(state.db);
    let lookup = service.lookup_upc(&upc_code).await?;
    Ok(Json(lookup))
}
