use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::num::NonZeroUsize;

/// Reference to a function exported by an engine thread.
///
/// The referenced function object is owned by the script host; this is only
/// its address within the host's export table.
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct FunctionRef {
  bits: NonZeroUsize,
}

impl FunctionRef {
  /// Creates a new `FunctionRef` from a non-zero host address.
  #[inline]
  pub const fn new(bits: NonZeroUsize) -> Self {
    Self { bits }
  }

  /// Creates a new `FunctionRef`, or `None` if `bits` is zero.
  #[inline]
  pub const fn from_bits(bits: usize) -> Option<Self> {
    match NonZeroUsize::new(bits) {
      Some(bits) => Some(Self::new(bits)),
      None => None,
    }
  }

  /// Returns the raw host address.
  #[inline]
  pub const fn into_bits(self) -> usize {
    self.bits.get()
  }
}

impl Debug for FunctionRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "FunctionRef({:#x})", self.bits.get())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
