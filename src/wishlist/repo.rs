use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// The user's stored wishlist, or None if no document exists yet.
pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Vec<Uuid>>> {
    let items: Option<Json<Vec<Uuid>>> =
        sqlx::query_scalar("SELECT items FROM wishlists WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;
    Ok(items.map(|j| j.0))
}

/// Whole-document rewrite, last-writer-wins like the cart.
pub async fn upsert(db: &PgPool, user_id: Uuid, items: &[Uuid]) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO wishlists (user_id, items)
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
