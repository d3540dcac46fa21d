//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Medications and stock lots are entities: two lots with equal quantity and
/// dates are still different lots.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
