use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::dto::{CategoryInput, ProductFilter, ProductInput};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category_id: Uuid,
    pub platform: Vec<String>,
    pub genre: Vec<String>,
    pub content_rating: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    pub developer: String,
    pub publisher: String,
    pub in_stock: i32,
    pub featured: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
}

const PRODUCT_COLUMNS: &str = "id, title, description, price, image_url, category_id, platform, \
     genre, content_rating, release_date, developer, publisher, in_stock, featured, \
     average_rating, total_reviews";

impl Category {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, image_url FROM categories ORDER BY id",
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, input: &CategoryInput) -> anyhow::Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, image_url
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}

/// Builds the filtered listing query. Filters are ANDed; tag filters use
/// array membership. Ordered by id so offset pagination is stable.
pub fn list_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"));
    if let Some(category) = filter.category {
        qb.push(" AND category_id = ").push_bind(category);
    }
    if let Some(platform) = &filter.platform {
        qb.push(" AND ")
            .push_bind(platform.clone())
            .push(" = ANY(platform)");
    }
    if let Some(genre) = &filter.genre {
        qb.push(" AND ")
            .push_bind(genre.clone())
            .push(" = ANY(genre)");
    }
    if let Some(featured) = filter.featured {
        qb.push(" AND featured = ").push_bind(featured);
    }
    qb.push(" ORDER BY id LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.skip);
    qb
}

impl Product {
    pub async fn list(db: &PgPool, filter: &ProductFilter) -> anyhow::Result<Vec<Product>> {
        let rows = list_query(filter)
            .build_query_as::<Product>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
        let row =
            sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(row)
    }

    /// Existing products for a set of ids, in no particular order. Missing
    /// ids are simply absent from the result.
    pub async fn get_many(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Inserts with derived aggregates forced to zero; only the review
    /// service ever writes average_rating/total_reviews.
    pub async fn create(db: &PgPool, input: &ProductInput) -> anyhow::Result<Product> {
        let row = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (id, title, description, price, image_url, category_id,
                                  platform, genre, content_rating, release_date, developer,
                                  publisher, in_stock, featured, average_rating, total_reviews)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 0, 0)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(&input.platform)
        .bind(&input.genre)
        .bind(&input.content_rating)
        .bind(input.release_date)
        .bind(&input.developer)
        .bind(&input.publisher)
        .bind(input.in_stock)
        .bind(input.featured)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Column-list patch that never touches the derived aggregates.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        input: &ProductInput,
    ) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET title = $2, description = $3, price = $4, image_url = $5, category_id = $6,
                platform = $7, genre = $8, content_rating = $9, release_date = $10,
                developer = $11, publisher = $12, in_stock = $13, featured = $14
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(&input.platform)
        .bind(&input.genre)
        .bind(&input.content_rating)
        .bind(input.release_date)
        .bind(&input.developer)
        .bind(&input.publisher)
        .bind(input.in_stock)
        .bind(input.featured)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// No cascade: review, cart, and wishlist references may dangle and
    /// every read path tolerates that.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_filter() -> ProductFilter {
        serde_json::from_str("{}").unwrap()
    }

    #[test]
    fn unfiltered_query_only_paginates() {
        let qb = list_query(&empty_filter());
        let sql = qb.sql();
        assert!(sql.contains("ORDER BY id"));
        assert!(sql.contains("LIMIT"));
        assert!(sql.contains("OFFSET"));
        assert!(!sql.contains("category_id ="));
        assert!(!sql.contains("ANY(platform)"));
    }

    #[test]
    fn filters_are_anded() {
        let mut filter = empty_filter();
        filter.category = Some(Uuid::new_v4());
        filter.platform = Some("PC".into());
        filter.genre = Some("RPG".into());
        filter.featured = Some(true);
        let qb = list_query(&filter);
        let sql = qb.sql();
        assert!(sql.contains("AND category_id ="));
        assert!(sql.contains("= ANY(platform)"));
        assert!(sql.contains("= ANY(genre)"));
        assert!(sql.contains("AND featured ="));
    }

    #[test]
    fn tag_filters_use_membership_not_equality() {
        let mut filter = empty_filter();
        filter.platform = Some("PC".into());
        let qb = list_query(&filter);
        assert!(qb.sql().contains("= ANY(platform)"));
        assert!(!qb.sql().contains("platform ="));
    }
}
