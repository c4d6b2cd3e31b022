use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::reviews::dto::ReviewInput;
use crate::reviews::repo::{self, Review};
use crate::reviews::services::rating_summary;
use crate::state::AppState;

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/products/:id/reviews", get(list_reviews))
        .route("/products/:id/reviews", post(create_review))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(repo::list_by_product(&state.db, product_id).await?))
}

#[instrument(skip(state, user, payload))]
pub async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::BadRequest("Rating must be between 1 and 5".into()));
    }

    let review = repo::insert(&state.db, user.id, product_id, payload.rating, &payload.comment)
        .await?
        .ok_or_else(|| ApiError::Conflict("You have already reviewed this product".into()))?;

    // Recompute the derived aggregate from every stored review and patch it
    // onto the product. A failure here leaves the aggregate stale until the
    // next review, never a lost review.
    let reviews = repo::list_by_product(&state.db, product_id).await?;
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
    let (average_rating, total_reviews) = rating_summary(&ratings);
    repo::store_aggregate(&state.db, product_id, average_rating, total_reviews).await?;

    info!(
        user_id = %user.id,
        %product_id,
        rating = payload.rating,
        average_rating,
        total_reviews,
        "review created"
    );
    Ok((StatusCode::CREATED, Json(review)))
}
