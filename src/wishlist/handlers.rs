use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::catalog::repo::Product;
use crate::error::ApiError;
use crate::state::AppState;
use crate::wishlist::repo;
use crate::wishlist::services::{add_product, remove_product};

#[derive(Debug, Deserialize)]
pub struct WishlistItemRequest {
    pub product_id: Uuid,
}

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(get_wishlist))
        .route("/wishlist/add", post(add_item))
        .route("/wishlist/remove/:product_id", delete(remove_item))
}

#[instrument(skip(state, user))]
pub async fn get_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let ids = repo::find(&state.db, user.id).await?.unwrap_or_default();
    // Dangling references drop out here: get_many only returns live rows.
    let products = Product::get_many(&state.db, &ids).await?;
    Ok(Json(json!({ "items": products })))
}

#[instrument(skip(state, user, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<WishlistItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut items = repo::find(&state.db, user.id).await?.unwrap_or_default();
    if !add_product(&mut items, payload.product_id) {
        return Ok(Json(json!({ "message": "Item already in wishlist" })));
    }
    repo::upsert(&state.db, user.id, &items).await?;
    info!(user_id = %user.id, product_id = %payload.product_id, "wishlist item added");
    Ok(Json(json!({ "message": "Item added to wishlist" })))
}

#[instrument(skip(state, user))]
pub async fn remove_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let mut items = repo::find(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wishlist not found".into()))?;
    remove_product(&mut items, product_id);
    repo::upsert(&state.db, user.id, &items).await?;
    info!(user_id = %user.id, %product_id, "wishlist item removed");
    Ok(Json(json!({ "message": "Item removed from wishlist" })))
}
