use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Caller-suppliable product fields. The derived aggregates
/// (average_rating/total_reviews) are deliberately absent: create zeroes
/// them and update leaves them untouched.
#[derive(Debug, Deserialize)]
pub struct ProductInput {
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
    #[serde(default)]
    pub featured: bool,
}

/// Query parameters for product listing. Filters are ANDed.
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<Uuid>,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub featured: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub skip: i64,
}

fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_defaults_apply() {
        let f: ProductFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.limit, 20);
        assert_eq!(f.skip, 0);
        assert!(f.category.is_none());
        assert!(f.platform.is_none());
        assert!(f.genre.is_none());
        assert!(f.featured.is_none());
    }

    #[test]
    fn filter_parses_all_fields() {
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{"category":"{id}","platform":"PC","genre":"RPG","featured":true,"limit":5,"skip":10}}"#
        );
        let f: ProductFilter = serde_json::from_str(&raw).unwrap();
        assert_eq!(f.category, Some(id));
        assert_eq!(f.platform.as_deref(), Some("PC"));
        assert_eq!(f.genre.as_deref(), Some("RPG"));
        assert_eq!(f.featured, Some(true));
        assert_eq!(f.limit, 5);
        assert_eq!(f.skip, 10);
    }

    #[test]
    fn product_input_featured_defaults_false() {
        let raw = r#"{
            "title": "Starfall",
            "description": "space RPG",
            "price": 59.99,
            "image_url": "https://cdn.example.com/starfall.jpg",
            "category_id": "8c0f6d3a-9a43-4b8f-9a7d-2f4f0a1b2c3d",
            "platform": ["PC"],
            "genre": ["RPG"],
            "content_rating": "T",
            "release_date": "2024-03-01T00:00:00Z",
            "developer": "Nova",
            "publisher": "Nova",
            "in_stock": 12
        }"#;
        let input: ProductInput = serde_json::from_str(raw).unwrap();
        assert!(!input.featured);
        assert_eq!(input.platform, vec!["PC"]);
    }
}
