use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::ops::Deref;
use triomphe::Arc;

use crate::raise;
use crate::thread::EngineThread;

/// Shared, liveness-checked handle to an [`EngineThread`].
///
/// A handle is either empty or keeps its thread alive. The engine registry,
/// the thread manager, and message senders all hold handles; a thread is
/// released when its last handle is dropped.
///
/// Dereferencing an empty handle is a contract violation.
#[derive(Clone, Default)]
#[repr(transparent)]
pub struct ThreadRef {
  inner: Option<Arc<EngineThread>>,
}

impl ThreadRef {
  /// Returns a handle that refers to no thread.
  #[inline]
  pub const fn empty() -> Self {
    Self { inner: None }
  }

  #[inline]
  pub(crate) fn new(thread: EngineThread) -> Self {
    Self {
      inner: Some(Arc::new(thread)),
    }
  }

  /// Returns `true` if the handle refers to no thread.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.inner.is_none()
  }

  /// Returns the referenced thread, or `None` for an empty handle.
  #[inline]
  pub fn try_get(&self) -> Option<&EngineThread> {
    self.inner.as_deref()
  }

  /// Returns the referenced thread.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the handle is empty.
  #[inline]
  pub fn get(&self) -> &EngineThread {
    match self.inner.as_deref() {
      Some(thread) => thread,
      None => raise!(Error, SysInv, "empty thread handle"),
    }
  }

  /// Returns `true` if both handles refer to the same thread, or both are
  /// empty.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    match (&self.inner, &other.inner) {
      (Some(this), Some(that)) => Arc::ptr_eq(this, that),
      (None, None) => true,
      _ => false,
    }
  }
}

impl Deref for ThreadRef {
  type Target = EngineThread;

  #[inline]
  fn deref(&self) -> &Self::Target {
    self.get()
  }
}

impl PartialEq for ThreadRef {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other)
  }
}

impl Eq for ThreadRef {}

impl Debug for ThreadRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.try_get() {
      Some(thread) => write!(f, "ThreadRef({})", thread.id()),
      None => f.write_str("ThreadRef(empty)"),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
