//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; to "modify" one,
/// build a new one. In this workspace: validated quantities, expiry statuses,
/// roles and session snapshots.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
