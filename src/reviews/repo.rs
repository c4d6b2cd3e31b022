use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn list_by_product(db: &PgPool, product_id: Uuid) -> anyhow::Result<Vec<Review>> {
    let rows = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, user_id, product_id, rating, comment, created_at
        FROM reviews
        WHERE product_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(product_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Inserts atomically against the (user_id, product_id) unique index.
/// Returns None when that user already reviewed the product; the rejected
/// insert is the conflict signal, so there is no check-then-act window.
pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    rating: i32,
    comment: &str,
) -> anyhow::Result<Option<Review>> {
    let row = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (id, user_id, product_id, rating, comment, created_at)
        VALUES ($1, $2, $3, $4, $5, now())
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING id, user_id, product_id, rating, comment, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .bind(rating)
    .bind(comment)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Two-column partial update owned by this service; the catalog update path
/// never writes these fields.
pub async fn store_aggregate(
    db: &PgPool,
    product_id: Uuid,
    average_rating: f64,
    total_reviews: i64,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE products SET average_rating = $2, total_reviews = $3 WHERE id = $1")
        .bind(product_id)
        .bind(average_rating)
        .bind(total_reviews as i32)
        .execute(db)
        .await?;
    Ok(())
}
