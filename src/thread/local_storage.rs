use hashbrown::HashMap;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::consts::CAP_LOCAL_STORAGE;

/// Key/value slots local to one engine thread, or to an engine before it
/// has an execution context.
///
/// Keys are integers handed out by the script host; values are opaque
/// machine words. The underlying [`HashMap`] is `None` until the first
/// `set()` call, so threads that never use local storage never allocate.
#[derive(Default)]
#[repr(transparent)]
pub struct LocalStorage {
  inner: Option<HashMap<u64, usize>>,
}

impl LocalStorage {
  #[inline]
  fn alloc_table() -> HashMap<u64, usize> {
    HashMap::with_capacity(CAP_LOCAL_STORAGE)
  }

  /// Creates a new, empty local storage table.
  ///
  /// No allocation occurs until the first insertion.
  #[inline]
  pub const fn new() -> Self {
    Self { inner: None }
  }

  /// Returns the value stored under `key`.
  #[inline]
  pub fn get(&self, key: u64) -> Option<usize> {
    self.inner.as_ref().and_then(|data| data.get(&key).copied())
  }

  /// Stores `value` under `key`, returning the previous value.
  pub fn set(&mut self, key: u64, value: usize) -> Option<usize> {
    self
      .inner
      .get_or_insert_with(Self::alloc_table)
      .insert(key, value)
  }

  /// Removes `key`, returning its value.
  pub fn remove(&mut self, key: u64) -> Option<usize> {
    self.inner.as_mut().and_then(|data| data.remove(&key))
  }

  /// Returns the number of occupied slots.
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.as_ref().map_or(0, HashMap::len)
  }

  /// Returns `true` if no slot is occupied.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Debug for LocalStorage {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    if let Some(data) = self.inner.as_ref() {
      f.write_str("LocalStorage ")?;
      f.debug_map().entries(data.iter()).finish()
    } else {
      f.write_str("LocalStorage {}")
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
