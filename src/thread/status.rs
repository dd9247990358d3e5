use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::loom::sync::atomic::AtomicU8;
use crate::loom::sync::atomic::Ordering;

/// Lifecycle state of an engine thread.
///
/// Transitions are driven by the thread manager, not by the engine.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum ThreadStatus {
  #[default]
  Empty = 0,
  NotStarted = 1,
  Running = 2,
  Paused = 3,
}

impl ThreadStatus {
  #[inline]
  const fn from_bits(bits: u8) -> Self {
    match bits {
      1 => Self::NotStarted,
      2 => Self::Running,
      3 => Self::Paused,
      _ => Self::Empty,
    }
  }
}

/// [`ThreadStatus`] cell readable from any core.
#[repr(transparent)]
pub(crate) struct AtomicStatus {
  inner: AtomicU8,
}

impl AtomicStatus {
  #[inline]
  pub(crate) fn new(status: ThreadStatus) -> Self {
    Self {
      inner: AtomicU8::new(status as u8),
    }
  }

  #[inline]
  pub(crate) fn load(&self) -> ThreadStatus {
    ThreadStatus::from_bits(self.inner.load(Ordering::Acquire))
  }

  #[inline]
  pub(crate) fn store(&self, status: ThreadStatus) {
    self.inner.store(status as u8, Ordering::Release);
  }
}

impl Debug for AtomicStatus {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Debug::fmt(&self.load(), f)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
