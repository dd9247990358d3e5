use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::num::NonZeroU64;

use crate::loom::sync::atomic::AtomicU64;
use crate::loom::sync::atomic::Ordering;

/// Generator of per-registry thread serial numbers.
///
/// Serials are never zero, so a zero serial can never name a live thread.
/// The counter wraps around on overflow, skipping zero.
#[repr(transparent)]
pub(crate) struct SerialCounter {
  inner: AtomicU64,
}

impl SerialCounter {
  /// Creates a new counter whose first serial is `1`.
  #[inline]
  pub(crate) fn new() -> Self {
    Self::starting_at(NonZeroU64::MIN)
  }

  /// Creates a new counter whose first serial is `first`.
  #[inline]
  pub(crate) fn starting_at(first: NonZeroU64) -> Self {
    Self {
      inner: AtomicU64::new(first.get()),
    }
  }

  /// Hands out the next serial.
  #[inline]
  pub(crate) fn next(&self) -> NonZeroU64 {
    let mut current: u64 = self.inner.load(Ordering::Relaxed);

    loop {
      let updated: u64 = match current.wrapping_add(1) {
        0 => 1,
        value => value,
      };

      match self
        .inner
        .compare_exchange_weak(current, updated, Ordering::Relaxed, Ordering::Relaxed)
      {
        // SAFETY: The counter never stores zero.
        Ok(prev) => break unsafe { NonZeroU64::new_unchecked(prev) },
        Err(next) => current = next,
      }
    }
  }
}

impl Debug for SerialCounter {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Debug::fmt(&self.inner, f)
  }
}

impl Default for SerialCounter {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
