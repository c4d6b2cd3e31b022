use uuid::Uuid;

/// Set-semantics add. Returns false when the product was already present,
/// so the handler can answer idempotently instead of duplicating.
pub fn add_product(items: &mut Vec<Uuid>, product_id: Uuid) -> bool {
    if items.contains(&product_id) {
        return false;
    }
    items.push(product_id);
    true
}

/// Removing an absent id is a silent no-op.
pub fn remove_product(items: &mut Vec<Uuid>, product_id: Uuid) {
    items.retain(|id| *id != product_id);
}
