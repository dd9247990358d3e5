use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Identifier of a physical core.
///
/// Core identifiers double as engine identifiers: the engine for core `n`
/// lives at index `n` of the [`Engines`] table.
///
/// [`Engines`]: crate::engine::Engines
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct CoreId {
  bits: u32,
}

impl CoreId {
  /// Creates a new `CoreId`.
  #[inline]
  pub const fn new(bits: u32) -> Self {
    Self { bits }
  }

  /// Returns the raw core number.
  #[inline]
  pub const fn get(self) -> u32 {
    self.bits
  }

  /// Returns the core number as a table index.
  #[inline]
  pub const fn index(self) -> usize {
    self.bits as usize
  }
}

impl Debug for CoreId {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "CoreId({})", self.bits)
  }
}

impl Display for CoreId {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "core{}", self.bits)
  }
}

impl From<u32> for CoreId {
  #[inline]
  fn from(other: u32) -> Self {
    Self::new(other)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
