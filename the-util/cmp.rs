//! Ordering helpers for optional values.

use std::cmp::Ordering;

/// Compares two optional values, ordering an absent value before every present
/// one. Two absent values compare equal.
pub fn safe_compare<T: Ord + ?Sized>(first: Option<&T>, second: Option<&T>) -> Ordering {
  match (first, second) {
    (Some(first), Some(second)) => first.cmp(second),
    (None, Some(_)) => Ordering::Less,
    (Some(_), None) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Like [`safe_compare`] but for types with a partial order.
///
/// Returns `None` only when both values are present and incomparable (for
/// example `f64::NAN`).
pub fn safe_partial_compare<T: PartialOrd + ?Sized>(
  first: Option<&T>,
  second: Option<&T>,
) -> Option<Ordering> {
  match (first, second) {
    (Some(first), Some(second)) => first.partial_cmp(second),
    (None, Some(_)) => Some(Ordering::Less),
    (Some(_), None) => Some(Ordering::Greater),
    (None, None) => Some(Ordering::Equal),
  }
}
