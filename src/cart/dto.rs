use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::repo::Product;

/// Body for both add (accumulates) and update (replaces).
#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// One cart line joined against the live product.
#[derive(Debug, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
    pub subtotal: f64,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
}
