use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AdminUser;
use crate::catalog::dto::{CategoryInput, ProductFilter, ProductInput};
use crate::catalog::repo::{Category, Product};
use crate::error::ApiError;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/products", post(create_product))
        .route("/products/:id", put(update_product))
        .route("/products/:id", delete(delete_product))
}

fn check_price(input: &ProductInput) -> Result<(), ApiError> {
    if input.price < 0.0 {
        return Err(ApiError::BadRequest("Price must be non-negative".into()));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(Category::list(&state.db).await?))
}

#[instrument(skip(state, _admin, input))]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = Category::create(&state.db, &input).await?;
    info!(category_id = %category.id, name = %category.name, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(Product::list(&state.db, &filter).await?))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = Product::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".into()))?;
    Ok(Json(product))
}

#[instrument(skip(state, _admin, input))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    check_price(&input)?;
    let product = Product::create(&state.db, &input).await?;
    info!(product_id = %product.id, title = %product.title, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, _admin, input))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    check_price(&input)?;
    let product = Product::update(&state.db, id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".into()))?;
    info!(product_id = %product.id, "product updated");
    Ok(Json(product))
}

#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<Json<Value>, ApiError> {
    if !Product::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Product not found".into()));
    }
    info!(product_id = %id, "product deleted");
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
