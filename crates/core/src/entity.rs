//! Entity trait: identity that survives in-place updates.

/// A record whose identity stays fixed while its other fields change.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier assigned when the record was created.
    fn id(&self) -> &Self::Id;
}
