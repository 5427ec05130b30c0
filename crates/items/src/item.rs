use chrono::{DateTime, Utc};
use serde::Serialize;

use catalog_core::{Entity, ItemId};

/// Caller-supplied fields of an item (everything except id and timestamps).
///
/// Values are expected to be validated already; the store does not re-check
/// field constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
}

impl ItemDraft {
    /// Required fields only; `image_url` and `rating` start as `None`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock_quantity: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
            stock_quantity,
            image_url: None,
            rating: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    category: String,
    price: f64,
    stock_quantity: i32,
    image_url: Option<String>,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    pub(crate) fn new(id: ItemId, draft: ItemDraft, now: DateTime<Utc>) -> Self {
        let ItemDraft {
            name,
            description,
            category,
            price,
            stock_quantity,
            image_url,
            rating,
        } = draft;

        Self {
            id,
            name,
            description,
            category,
            price,
            stock_quantity,
            image_url,
            rating,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field. `id` and `created_at` are untouched and
    /// `updated_at` never moves backwards.
    pub(crate) fn overwrite(&mut self, draft: ItemDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.price = draft.price;
        self.stock_quantity = draft.stock_quantity;
        self.image_url = draft.image_url;
        self.rating = draft.rating;
        self.updated_at = now.max(self.updated_at);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Case-insensitive category match against an already-trimmed needle.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// The caller-owned fields of this item, as a draft.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price,
            stock_quantity: self.stock_quantity,
            image_url: self.image_url.clone(),
            rating: self.rating,
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
