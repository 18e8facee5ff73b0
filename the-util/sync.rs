//! Blocking coordination primitives that can be cancelled.
//!
//! Threads cannot be interrupted from the outside, so every blocking call here
//! takes a [`CancelToken`]. A blocking call that notices the token consumes the
//! cancellation and returns [`Cancelled`]; the `safe_*` wrappers log that,
//! raise the token again so the caller can still see it, and return normally.

use std::{
  mem,
  sync::Arc,
  time::{
    Duration,
    Instant,
  },
};

use parking_lot::{
  Condvar,
  Mutex,
};
use thiserror::Error;

/// How often a blocked latch or semaphore waiter re-checks its token.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wait was cancelled")]
pub struct Cancelled;

/// A shared cancellation flag.
///
/// Clones refer to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
  inner: Arc<TokenState>,
}

#[derive(Debug, Default)]
struct TokenState {
  cancelled: Mutex<bool>,
  wake:      Condvar,
}

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  /// Raises the flag and wakes any [`sleep`](Self::sleep) in progress.
  pub fn cancel(&self) {
    *self.inner.cancelled.lock() = true;
    self.inner.wake.notify_all();
  }

  pub fn is_cancelled(&self) -> bool {
    *self.inner.cancelled.lock()
  }

  /// Clears the flag, returning whether it was raised.
  pub fn take(&self) -> bool {
    mem::take(&mut *self.inner.cancelled.lock())
  }

  /// Blocks for `duration` unless the token is cancelled first.
  pub fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
    let deadline = Instant::now() + duration;
    let mut cancelled = self.inner.cancelled.lock();
    loop {
      if mem::take(&mut *cancelled) {
        return Err(Cancelled);
      }
      if Instant::now() >= deadline {
        return Ok(());
      }
      self.inner.wake.wait_until(&mut cancelled, deadline);
    }
  }
}

/// A gate that opens once it has been counted down to zero.
#[derive(Debug)]
pub struct CountDownLatch {
  count: Mutex<usize>,
  zero:  Condvar,
}

impl CountDownLatch {
  pub fn new(count: usize) -> Self {
    Self {
      count: Mutex::new(count),
      zero:  Condvar::new(),
    }
  }

  /// Decrements the count, releasing all waiters when it reaches zero.
  pub fn count_down(&self) {
    let mut count = self.count.lock();
    if *count > 0 {
      *count -= 1;
      if *count == 0 {
        self.zero.notify_all();
      }
    }
  }

  pub fn count(&self) -> usize {
    *self.count.lock()
  }

  /// Blocks until the count reaches zero.
  ///
  /// A token that is already cancelled fails the wait even if the latch is
  /// open.
  pub fn wait(&self, cancel: &CancelToken) -> Result<(), Cancelled> {
    let mut count = self.count.lock();
    loop {
      if cancel.take() {
        return Err(Cancelled);
      }
      if *count == 0 {
        return Ok(());
      }
      self.zero.wait_for(&mut count, POLL_INTERVAL);
    }
  }
}

/// A counting semaphore.
#[derive(Debug)]
pub struct Semaphore {
  permits:   Mutex<usize>,
  available: Condvar,
}

impl Semaphore {
  pub fn new(permits: usize) -> Self {
    Self {
      permits:   Mutex::new(permits),
      available: Condvar::new(),
    }
  }

  pub fn available_permits(&self) -> usize {
    *self.permits.lock()
  }

  /// Returns a permit, waking one blocked [`acquire`](Self::acquire).
  pub fn release(&self) {
    *self.permits.lock() += 1;
    self.available.notify_one();
  }

  /// Takes a permit if one is free, without blocking.
  pub fn try_acquire(&self) -> bool {
    let mut permits = self.permits.lock();
    if *permits == 0 {
      return false;
    }
    *permits -= 1;
    true
  }

  /// Blocks until a permit is free and takes it.
  pub fn acquire(&self, cancel: &CancelToken) -> Result<(), Cancelled> {
    let mut permits = self.permits.lock();
    loop {
      if cancel.take() {
        return Err(Cancelled);
      }
      if *permits > 0 {
        *permits -= 1;
        return Ok(());
      }
      self.available.wait_for(&mut permits, POLL_INTERVAL);
    }
  }
}

/// Waits for `latch` to open. Cancellation is logged and left raised on
/// `cancel` instead of being returned.
pub fn safe_await(latch: &CountDownLatch, cancel: &CancelToken) {
  if let Err(err) = latch.wait(cancel) {
    log::warn!("Error occurred while awaiting a count-down latch: {err}");
    cancel.cancel();
  }
}

/// Acquires a permit from `semaphore`. Cancellation is logged and left raised
/// on `cancel` instead of being returned.
pub fn safe_acquire(semaphore: &Semaphore, cancel: &CancelToken) {
  if let Err(err) = semaphore.acquire(cancel) {
    log::warn!("Error occurred while acquiring a semaphore permit: {err}");
    cancel.cancel();
  }
}

/// Sleeps for `duration`. Cancellation is logged and left raised on `cancel`
/// instead of being returned.
pub fn safe_sleep(duration: Duration, cancel: &CancelToken) {
  if let Err(err) = cancel.sleep(duration) {
    log::warn!("Error while sleeping: {err}");
    cancel.cancel();
  }
}
