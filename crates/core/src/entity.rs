//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Linear lookup of an entity by id within an insertion-ordered collection.
pub fn find_by_id<E: Entity>(records: &[E], id: E::Id) -> Option<&E> {
    records.iter().find(|r| r.id() == id)
}

/// Position of an entity by id within an insertion-ordered collection.
pub fn position_by_id<E: Entity>(records: &[E], id: E::Id) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}
