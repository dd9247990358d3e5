use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;

/// Opaque payload transported inside a [`Message`].
///
/// The payload is serialized by the sending thread and only decoded by the
/// receiver. It can be moved but never copied, so a payload is delivered at
/// most once.
///
/// [`Message`]: crate::message::Message
#[derive(Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct TransportData {
  bytes: Vec<u8>,
}

impl TransportData {
  /// Creates an empty payload.
  ///
  /// This does not allocate.
  #[inline]
  pub const fn empty() -> Self {
    Self { bytes: Vec::new() }
  }

  /// Returns `true` if the payload carries no data.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Returns the payload size in bytes.
  #[inline]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  /// Returns the serialized payload.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    self.bytes.as_slice()
  }

  /// Consumes the payload, returning the serialized bytes.
  #[inline]
  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }
}

impl From<Vec<u8>> for TransportData {
  #[inline]
  fn from(other: Vec<u8>) -> Self {
    Self { bytes: other }
  }
}

impl From<&[u8]> for TransportData {
  #[inline]
  fn from(other: &[u8]) -> Self {
    Self {
      bytes: other.to_vec(),
    }
  }
}

impl Debug for TransportData {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "TransportData({} bytes)", self.bytes.len())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
