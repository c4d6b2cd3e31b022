use std::collections::HashMap;

use uuid::Uuid;

use crate::cart::dto::{CartLine, CartView};
use crate::cart::repo::CartItem;
use crate::catalog::repo::Product;

/// Merge-on-add: an existing line accumulates quantity, anything else is
/// appended.
pub fn merge_item(items: &mut Vec<CartItem>, product_id: Uuid, quantity: i32) {
    if let Some(existing) = items.iter_mut().find(|i| i.product_id == product_id) {
        existing.quantity += quantity;
    } else {
        items.push(CartItem {
            product_id,
            quantity,
        });
    }
}

/// Replaces the stored quantity exactly. Returns false when the product has
/// no line in the cart.
pub fn set_quantity(items: &mut [CartItem], product_id: Uuid, quantity: i32) -> bool {
    match items.iter_mut().find(|i| i.product_id == product_id) {
        Some(item) => {
            item.quantity = quantity;
            true
        }
        None => false,
    }
}

/// Removing an absent product is a no-op; an emptied list stays as an empty
/// document.
pub fn remove_product(items: &mut Vec<CartItem>, product_id: Uuid) {
    items.retain(|i| i.product_id != product_id);
}

/// Joins stored lines against the current catalog. Lines whose product no
/// longer exists are silently dropped and excluded from the total.
pub fn build_cart_view(items: &[CartItem], products: Vec<Product>) -> CartView {
    let by_id: HashMap<Uuid, Product> = products.into_iter().map(|p| (p.id, p)).collect();
    let mut lines = Vec::new();
    let mut total = 0.0;
    for item in items {
        if let Some(product) = by_id.get(&item.product_id) {
            let subtotal = product.price * item.quantity as f64;
            total += subtotal;
            lines.push(CartLine {
                product: product.clone(),
                quantity: item.quantity,
                subtotal,
            });
        }
    }
    CartView {
        items: lines,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn product(id: Uuid, price: f64) -> Product {
        Product {
            id,
            title: "Starfall".into(),
            description: "space RPG".into(),
            price,
            image_url: String::new(),
            category_id: Uuid::new_v4(),
            platform: vec!["PC".into()],
            genre: vec!["RPG".into()],
            content_rating: "T".into(),
            release_date: OffsetDateTime::now_utc(),
            developer: "Nova".into(),
            publisher: "Nova".into(),
            in_stock: 10,
            featured: false,
            average_rating: 0.0,
            total_reviews: 0,
        }
    }

    #[test]
    fn merge_accumulates_existing_line() {
        let pid = Uuid::new_v4();
        let mut items = Vec::new();
        merge_item(&mut items, pid, 2);
        merge_item(&mut items, pid, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn merge_appends_new_line() {
        let mut items = vec![CartItem {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }];
        merge_item(&mut items, Uuid::new_v4(), 4);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].quantity, 4);
    }

    #[test]
    fn set_quantity_replaces_not_accumulates() {
        let pid = Uuid::new_v4();
        let mut items = vec![CartItem {
            product_id: pid,
            quantity: 7,
        }];
        assert!(set_quantity(&mut items, pid, 2));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn set_quantity_reports_missing_line() {
        let mut items = vec![CartItem {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }];
        assert!(!set_quantity(&mut items, Uuid::new_v4(), 2));
    }

    #[test]
    fn remove_absent_product_is_noop() {
        let pid = Uuid::new_v4();
        let mut items = vec![CartItem {
            product_id: pid,
            quantity: 1,
        }];
        remove_product(&mut items, Uuid::new_v4());
        assert_eq!(items.len(), 1);
        remove_product(&mut items, pid);
        assert!(items.is_empty());
    }

    #[test]
    fn view_totals_price_times_quantity() {
        let pid = Uuid::new_v4();
        let items = vec![CartItem {
            product_id: pid,
            quantity: 5,
        }];
        let view = build_cart_view(&items, vec![product(pid, 59.99)]);
        assert_eq!(view.items.len(), 1);
        assert!((view.items[0].subtotal - 299.95).abs() < 1e-9);
        assert!((view.total - 299.95).abs() < 1e-9);
    }

    #[test]
    fn view_drops_dangling_references() {
        let live = Uuid::new_v4();
        let deleted = Uuid::new_v4();
        let items = vec![
            CartItem {
                product_id: live,
                quantity: 1,
            },
            CartItem {
                product_id: deleted,
                quantity: 3,
            },
        ];
        let view = build_cart_view(&items, vec![product(live, 10.0)]);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].product.id, live);
        assert!((view.total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_cart_view_has_zero_total() {
        let view = build_cart_view(&[], vec![]);
        assert!(view.items.is_empty());
        assert_eq!(view.total, 0.0);
    }
}
