//! HTTP handlers for the user profile and wishlist

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{AddToWishlist, UserProfile, WishlistAddResult};
use crate::services::{ProfileService, WishlistService};
use crate::AppState;

/// Get the current user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    let service = ProfileService::new(state.db);
    let profile = service.get_profile(current_user.user_id()).await?;
    Ok(Json(profile))
}

/// Add a product to the wishlist
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<AddToWishlist>,
) -> AppResult<Json<WishlistAddResult>> {
    let service = WishlistService::new(state.db);
    let result = service.add(current_user.user_id(), input.product_id).await?;
    Ok(Json(result))
}

/// Remove an entry from the wishlist
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(entry_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = WishlistService::new(state.db);
    service.remove(current_user.user_id(), entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
