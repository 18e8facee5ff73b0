//! Helpers for walking an error's chain of causes.
//!
//! A cause chain is followed through [`Error::source`]. Chains may loop back on
//! themselves, so every walk here remembers the nodes it has visited (by
//! identity, never by value) and stops as soon as one shows up again.
//!
//! Identity is the full trait object pointer: an error and a cause stored as
//! its first field share an address but differ in type.

use std::{
  collections::HashSet,
  error::Error,
  iter::FusedIterator,
  ptr,
};

type DynError = dyn Error + 'static;

/// Returns the first error in the cause chain of `root` (including `root`
/// itself) whose concrete type is `T`.
///
/// Returns `None` when `root` is absent, or when the chain ends or loops back
/// to an already visited node without a match.
pub fn find_cause<'a, T: Error + 'static>(root: Option<&'a DynError>) -> Option<&'a T> {
  causes(root?).find_map(|err| err.downcast_ref::<T>())
}

/// Returns the recorded cause of `err`, unless the error names itself as its
/// own cause.
pub fn direct_cause(err: &DynError) -> Option<&DynError> {
  err.source().filter(|cause| !ptr::eq(*cause, err))
}

/// Iterates over `root` and its causes, yielding each distinct node once.
pub fn causes(root: &DynError) -> Causes<'_> {
  Causes {
    next:    Some(root),
    visited: HashSet::new(),
  }
}

/// Iterator created by [`causes`].
#[derive(Debug)]
pub struct Causes<'a> {
  next:    Option<&'a DynError>,
  visited: HashSet<*const DynError>,
}

impl<'a> Iterator for Causes<'a> {
  type Item = &'a DynError;

  fn next(&mut self) -> Option<Self::Item> {
    let current = self.next.take()?;
    if !self.visited.insert(ptr::from_ref(current)) {
      return None;
    }
    self.next = current.source();
    Some(current)
  }
}

impl FusedIterator for Causes<'_> {}
