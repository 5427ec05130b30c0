//! Item catalog domain module.
//!
//! This crate owns the item record and the in-memory item store. It has no
//! HTTP concerns; request validation happens in `catalog-api` before a draft
//! reaches the store.

pub mod clock;
pub mod item;
pub mod seed;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use item::{Item, ItemDraft};
pub use store::ItemStore;
