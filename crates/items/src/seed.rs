//! Fixed sample data inserted at startup.

use catalog_core::DomainResult;

use crate::item::ItemDraft;
use crate::store::ItemStore;

/// The sample catalog, in insertion order.
pub fn sample_items() -> Vec<ItemDraft> {
    vec![
        ItemDraft::new(
            "iPhone 15 Pro Max",
            "Latest Apple flagship smartphone with A17 Pro chip, titanium design, and advanced camera system",
            "Electronics",
            1199.99,
            50,
        )
        .with_image_url("https://example.com/iphone15.jpg")
        .with_rating(4.8),
        ItemDraft::new(
            "The Shawshank Redemption",
            "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency",
            "Drama",
            3.99,
            1000,
        )
        .with_image_url("https://example.com/shawshank.jpg")
        .with_rating(4.9),
        ItemDraft::new(
            "Sony WH-1000XM5 Headphones",
            "Industry-leading noise canceling headphones with exceptional sound quality and 30-hour battery life",
            "Electronics",
            399.99,
            30,
        )
        .with_image_url("https://example.com/sony-headphones.jpg")
        .with_rating(4.7),
    ]
}

impl ItemStore {
    /// A fresh store holding the sample catalog (ids 1..=3).
    pub fn seeded() -> DomainResult<Self> {
        let store = Self::new();
        for draft in sample_items() {
            store.create(draft)?;
        }
        tracing::info!(items = store.count(), "seeded item store");
        Ok(store)
    }
}
