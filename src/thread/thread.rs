use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::OnceLock;

use crate::arch::CoreId;
use crate::arch::IrqContext;
use crate::context::SchedRef;
use crate::engine::Engine;
use crate::engine::Engines;
use crate::loom::sync::Mutex;
use crate::message::Message;
use crate::raise;
use crate::thread::AtomicStatus;
use crate::thread::LocalStorage;
use crate::thread::Mailbox;
use crate::thread::ThreadId;
use crate::thread::ThreadStatus;

/// A schedulable unit of work inside a per-core engine.
///
/// Threads are created by a [`ThreadRegistry`] and reached through
/// [`ThreadRef`] handles. The thread refers back to its engine by core
/// identifier only; [`engine`] resolves it through the engine table.
///
/// [`ThreadRegistry`]: crate::engine::ThreadRegistry
/// [`ThreadRef`]: crate::thread::ThreadRef
/// [`engine`]: Self::engine
pub struct EngineThread {
  id: ThreadId,
  status: AtomicStatus,
  sched: OnceLock<SchedRef>,
  mailbox: Mailbox,
  storage: Mutex<LocalStorage>,
}

impl EngineThread {
  #[inline]
  pub(crate) fn new(id: ThreadId, mailbox: Mailbox) -> Self {
    Self {
      id,
      status: AtomicStatus::new(ThreadStatus::Empty),
      sched: OnceLock::new(),
      mailbox,
      storage: Mutex::new(LocalStorage::new()),
    }
  }

  /// Returns the thread identifier.
  #[inline]
  pub const fn id(&self) -> ThreadId {
    self.id
  }

  /// Returns the core of the engine that owns this thread.
  #[inline]
  pub const fn engine_id(&self) -> CoreId {
    self.id.core()
  }

  /// Resolves the engine that owns this thread.
  ///
  /// Returns `None` if `engines` has no engine for the thread's core.
  #[inline]
  pub fn engine<'a>(&self, engines: &'a Engines) -> Option<&'a Engine> {
    engines.get(self.engine_id())
  }

  /// Returns the current lifecycle state.
  #[inline]
  pub fn status(&self) -> ThreadStatus {
    self.status.load()
  }

  /// Updates the lifecycle state.
  ///
  /// Called by the thread manager as it starts, pauses, and resumes the
  /// thread.
  #[inline]
  pub fn set_status(&self, status: ThreadStatus) {
    self.status.store(status);
  }

  /// Returns the thread manager's reference to this thread, once admitted.
  #[inline]
  pub fn sched(&self) -> Option<SchedRef> {
    self.sched.get().copied()
  }

  /// Returns `true` if the thread has been admitted into a thread manager.
  #[inline]
  pub fn is_admitted(&self) -> bool {
    self.sched.get().is_some()
  }

  /// Records the thread manager's reference to this thread.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the thread was already admitted.
  pub(crate) fn bind(&self, sched: SchedRef) {
    if self.sched.set(sched).is_err() {
      raise!(Error, SysInv, format!("thread {} admitted twice", self.id));
    }
  }

  /// Returns the thread's mailbox.
  #[inline]
  pub const fn mailbox(&self) -> &Mailbox {
    &self.mailbox
  }

  /// Removes and returns every queued message, oldest first.
  ///
  /// See [`Mailbox::take_messages`].
  #[inline]
  pub fn take_messages(&self) -> Vec<Message> {
    self.mailbox.take_messages()
  }

  /// Queues `message` for this thread from ordinary kernel code.
  ///
  /// See [`Mailbox::push_message`].
  #[inline]
  pub fn push_message(&self, message: Message) {
    self.mailbox.push_message(message);
  }

  /// Queues `message` for this thread from an interrupt handler.
  ///
  /// See [`Mailbox::push_message_irq`].
  #[inline]
  pub fn push_message_irq(&self, irq: &IrqContext, message: Message) {
    self.mailbox.push_message_irq(irq, message);
  }

  /// Runs `f` with exclusive access to this thread's local storage.
  ///
  /// Must not be called from an interrupt handler.
  #[inline]
  pub fn with_local_storage<F, R>(&self, f: F) -> R
  where
    F: FnOnce(&mut LocalStorage) -> R,
  {
    f(&mut self.storage.lock())
  }
}

impl Debug for EngineThread {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("EngineThread")
      .field("id", &self.id)
      .field("status", &self.status)
      .field("sched", &self.sched.get())
      .field("mailbox", &self.mailbox)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
