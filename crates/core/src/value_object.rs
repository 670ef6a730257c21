//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Money`
/// amounts of 20 are the same amount, whereas two members called "Ana" are
/// distinct entities (see [`crate::Entity`]).
///
/// ```ignore
/// let a = Money::from_minor(2000);
/// let b = Money::from_minor(2000);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
