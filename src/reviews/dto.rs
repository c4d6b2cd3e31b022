use serde::Deserialize;

/// Caller-supplied review fields. user_id and product_id always come from
/// the authenticated identity and the path, never from the body.
#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub rating: i32,
    pub comment: String,
}
