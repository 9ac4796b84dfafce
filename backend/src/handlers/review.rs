//! HTTP handlers for review endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{GradedReview, RawReviewForm, ReviewDetail};
use crate::services::{ReportingService, ReviewService};
use crate::AppState;
use shared::{PaginatedResponse, Pagination};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    /// Pagination with configured defaults and limits applied
    pub fn pagination(&self, default_per_page: u32, max_per_page: u32) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(1),
            per_page: self.per_page.unwrap_or(default_per_page),
        }
        .clamped(max_per_page)
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Submit a review form
pub async fn submit_review(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(form): Json<RawReviewForm>,
) -> AppResult<(StatusCode, Json<GradedReview>)> {
    let service = ReviewService::new(state.db);
    let review = service.submit_review(current_user.user_id(), form).await?;
    Ok((StatusCode::CREATED, Json(GradedReview::from(review))))
}

/// List reviews newest first
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<PaginatedResponse<GradedReview>>> {
    let catalog = &state.config.catalog;
    let pagination = params.pagination(catalog.default_page_size, catalog.max_page_size);

    let service = ReviewService::new(state.db);
    let reviews = service.list_reviews(&pagination).await?;
    Ok(Json(reviews))
}

/// Get a review with its score breakdown
pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewDetail>> {
    let service = ReviewService::new(state.db);
    let review = service.get_review_detail(review_id).await?;
    Ok(Json(review))
}

/// Export every review
pub async fn export_reviews(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReviewService::new(state.db);
    let reviews = service.all_reviews().await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::reviews_to_csv(&reviews)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"reviews.csv\""),
            ],
            csv,
        )
            .into_response())
    } else {
        let graded: Vec<GradedReview> = reviews.into_iter().map(GradedReview::from).collect();
        Ok(Json(graded).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams { page: None, per_page: None };
        let pagination = params.pagination(20, 100);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 20);
    }

    #[test]
    fn test_list_params_clamped() {
        let params = ListParams { page: Some(0), per_page: Some(1000) };
        let pagination = params.pagination(20, 100);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 100);
    }
}
