use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::cart::dto::{CartItemRequest, CartView};
use crate::cart::repo;
use crate::cart::services::{build_cart_view, merge_item, remove_product, set_quantity};
use crate::catalog::repo::Product;
use crate::error::ApiError;
use crate::state::AppState;

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_item))
        .route("/cart/update", put(update_item))
        .route("/cart/remove/:product_id", delete(remove_item))
}

#[instrument(skip(state, user))]
pub async fn get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CartView>, ApiError> {
    let items = repo::find(&state.db, user.id).await?.unwrap_or_default();
    let ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    let products = Product::get_many(&state.db, &ids).await?;
    Ok(Json(build_cart_view(&items, products)))
}

#[instrument(skip(state, user, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CartItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut items = repo::find(&state.db, user.id).await?.unwrap_or_default();
    merge_item(&mut items, payload.product_id, payload.quantity);
    repo::upsert(&state.db, user.id, &items).await?;
    info!(user_id = %user.id, product_id = %payload.product_id, "cart item added");
    Ok(Json(json!({ "message": "Item added to cart" })))
}

#[instrument(skip(state, user, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CartItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut items = repo::find(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart not found".into()))?;
    if !set_quantity(&mut items, payload.product_id, payload.quantity) {
        return Err(ApiError::NotFound("Item not found in cart".into()));
    }
    repo::upsert(&state.db, user.id, &items).await?;
    info!(user_id = %user.id, product_id = %payload.product_id, "cart item updated");
    Ok(Json(json!({ "message": "Cart updated" })))
}

#[instrument(skip(state, user))]
pub async fn remove_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let mut items = repo::find(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart not found".into()))?;
    remove_product(&mut items, product_id);
    repo::upsert(&state.db, user.id, &items).await?;
    info!(user_id = %user.id, %product_id, "cart item removed");
    Ok(Json(json!({ "message": "Item removed from cart" })))
}
