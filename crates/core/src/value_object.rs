//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Operations that
/// "change" a value object return a new instance instead of mutating the
/// receiver, which keeps snapshots held elsewhere (for example the balance
/// recorded in an activity) stable.
///
/// ```ignore
/// let a = Amount::new(dec!(100));
/// let b = a.add(&Amount::new(dec!(50)))?;
/// assert_eq!(a, Amount::new(dec!(100))); // untouched
/// assert_eq!(b, Amount::new(dec!(150)));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
