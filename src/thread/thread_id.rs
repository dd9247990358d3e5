use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::num::NonZeroU64;

use crate::arch::CoreId;

/// Identifier of an engine thread.
///
/// Combines the core of the owning engine with a serial that is unique
/// within that engine's registry.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ThreadId {
  core: CoreId,
  serial: NonZeroU64,
}

impl ThreadId {
  #[inline]
  pub(crate) const fn new(core: CoreId, serial: NonZeroU64) -> Self {
    Self { core, serial }
  }

  /// Returns the core of the engine that created the thread.
  #[inline]
  pub const fn core(&self) -> CoreId {
    self.core
  }

  /// Returns the serial number of the thread within its engine.
  #[inline]
  pub const fn serial(&self) -> NonZeroU64 {
    self.serial
  }
}

impl Debug for ThreadId {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(self, f)
  }
}

impl Display for ThreadId {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "<{}.{}>", self.core.get(), self.serial)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
