use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Stored cart line: product reference plus quantity. Product existence is
/// not checked on write; the read path drops dangling references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// The user's stored cart items, or None if no cart document exists yet.
pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Vec<CartItem>>> {
    let items: Option<Json<Vec<CartItem>>> =
        sqlx::query_scalar("SELECT items FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;
    Ok(items.map(|j| j.0))
}

/// Rewrites the whole document. Concurrent edits to the same cart are
/// last-writer-wins; the document is small and per-user, so this is the
/// accepted trade-off rather than field-level mutation.
pub async fn upsert(db: &PgPool, user_id: Uuid, items: &[CartItem]) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO carts (user_id, items)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET items = EXCLUDED.items
        "#,
    )
    .bind(user_id)
    .bind(Json(items))
    .execute(db)
    .await?;
    Ok(())
}
