//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Groups, expenses, settlements and members are entities: the ledger keys
/// everything by their identifiers, never by their contents.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
