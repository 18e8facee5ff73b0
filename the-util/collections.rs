//! Collection helpers, chiefly lazy chunking of iterators.

use std::iter::FusedIterator;

/// Returns the first element of a list, if the list is present and non-empty.
pub fn first<T>(list: Option<&[T]>) -> Option<&T> {
  list.and_then(|list| list.first())
}

/// Returns `true` if the collection is absent or has no elements.
pub fn is_empty<T>(collection: Option<&[T]>) -> bool {
  collection.is_none_or(|collection| collection.is_empty())
}

/// Splits `iter` into batches of at most `size` elements.
///
/// Batches are produced lazily: each call to [`Iterator::next`] pulls up to
/// `size` elements from the source, so only one batch is ever held by the
/// adapter. Every batch but the last has exactly `size` elements, the last one
/// holds the remainder, and an exhausted source yields no trailing empty batch.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn chunkify<I: IntoIterator>(iter: I, size: usize) -> Chunks<I::IntoIter> {
  assert!(size != 0, "chunk size must be non-zero");
  Chunks {
    iter: iter.into_iter(),
    size,
  }
}

/// Iterator over fixed-size batches of another iterator.
///
/// Created by [`chunkify`] or [`ChunkifyExt::chunkify`]. The source is
/// consumed as batches are produced, so the sequence can only be walked once.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Chunks<I> {
  iter: I,
  size: usize,
}

impl<I> Chunks<I> {
  /// The maximum number of elements per batch.
  pub fn chunk_size(&self) -> usize {
    self.size
  }
}

impl<I: Iterator> Iterator for Chunks<I> {
  type Item = Vec<I::Item>;

  fn next(&mut self) -> Option<Self::Item> {
    let first = self.iter.next()?;

    let mut chunk = Vec::with_capacity(self.size);
    chunk.push(first);
    chunk.extend(self.iter.by_ref().take(self.size - 1));
    Some(chunk)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let (lower, upper) = self.iter.size_hint();
    (
      lower.div_ceil(self.size),
      upper.map(|upper| upper.div_ceil(self.size)),
    )
  }
}

impl<I: FusedIterator> FusedIterator for Chunks<I> {}

/// Extension trait adding [`chunkify`] as a method on every iterator.
pub trait ChunkifyExt: Iterator + Sized {
  /// See [`chunkify`].
  fn chunkify(self, size: usize) -> Chunks<Self> {
    chunkify(self, size)
  }
}

impl<I: Iterator> ChunkifyExt for I {}
