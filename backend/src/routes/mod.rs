//! Route definitions for the Strain Review Platform

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::identity_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Reviews
        .nest("/reviews", review_routes())
        // Product catalog
        .nest("/products", product_routes())
        // Strain database
        .nest("/strains", strain_routes())
        // Dashboard
        .route("/stats", get(handlers::get_stats))
        // Profile and wishlist
        .route("/profile", get(handlers::get_profile))
        .nest("/wishlist", wishlist_routes())
        // Client-side scoring
        .route("/score/preview", post(handlers::preview_score))
        .layer(middleware::from_fn_with_state(state, identity_middleware))
}

/// Review routes
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_reviews).post(handlers::submit_review))
        .route("/export", get(handlers::export_reviews))
        .route("/:review_id", get(handlers::get_review))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::add_product))
        .route("/upc/:upc_code", get(handlers::lookup_upc))
        .route("/:product_id", get(handlers::get_product))
}

/// Strain database routes
fn strain_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_strains))
        .route("/import", post(handlers::import_example_strains))
}

/// Wishlist routes
fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::add_to_wishlist))
        .route("/:entry_id", delete(handlers::remove_from_wishlist))
}
