use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::mem;
use std::sync::Arc;
use tracing::trace;

use crate::arch::CoreId;
use crate::arch::Cpu;
use crate::consts::CAP_REGISTRY_ROSTER;
use crate::loom::sync::Mutex;
use crate::loom::sync::MutexGuard;
use crate::loom::sync::atomic::AtomicUsize;
use crate::loom::sync::atomic::Ordering;
use crate::thread::EngineThread;
use crate::thread::Mailbox;
use crate::thread::SerialCounter;
use crate::thread::ThreadId;
use crate::thread::ThreadRef;

struct Roster {
  all: Vec<ThreadRef>,
  pending: Vec<ThreadRef>,
}

/// Every thread created for one engine.
///
/// Threads may be created from any core. Each new thread is recorded in
/// the roster and staged as pending until the engine's execution context
/// drains it with [`take_new_threads`].
///
/// The registry lock is never taken from an interrupt handler, so it does
/// not mask interrupts.
///
/// [`take_new_threads`]: Self::take_new_threads
pub struct ThreadRegistry {
  engine: CoreId,
  cpu: Arc<dyn Cpu>,
  reserve: usize,
  serial: SerialCounter,
  count: AtomicUsize,
  roster: Mutex<Roster>,
}

impl ThreadRegistry {
  /// Creates a new, empty registry for the engine on `engine`.
  ///
  /// Mailboxes of threads created here reserve `reserve` slots.
  pub fn new(engine: CoreId, cpu: Arc<dyn Cpu>, reserve: usize) -> Self {
    Self {
      engine,
      cpu,
      reserve,
      serial: SerialCounter::new(),
      count: AtomicUsize::new(0),
      roster: Mutex::new(Roster {
        all: Vec::with_capacity(CAP_REGISTRY_ROSTER),
        pending: Vec::new(),
      }),
    }
  }

  /// Returns the core of the owning engine.
  #[inline]
  pub const fn engine(&self) -> CoreId {
    self.engine
  }

  /// Returns the number of threads ever created here.
  #[inline]
  pub fn len(&self) -> usize {
    self.count.load(Ordering::Acquire)
  }

  /// Returns `true` if no thread was ever created here.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns a snapshot of every thread created here, in creation order.
  pub fn threads(&self) -> Vec<ThreadRef> {
    self.roster.lock().all.clone()
  }

  /// Creates a thread owned by this registry's engine.
  ///
  /// The thread is recorded in the roster and staged for admission. Safe
  /// to call concurrently from any core, but not from an interrupt
  /// handler.
  pub fn create(&self) -> ThreadRef {
    let id: ThreadId = ThreadId::new(self.engine, self.serial.next());
    let mailbox: Mailbox = Mailbox::new(Arc::clone(&self.cpu), self.reserve);
    let thread: ThreadRef = ThreadRef::new(EngineThread::new(id, mailbox));

    {
      let mut roster: MutexGuard<'_, Roster> = self.roster.lock();

      roster.all.push(thread.clone());
      roster.pending.push(thread.clone());

      self.count.store(roster.all.len(), Ordering::Release);
    }

    trace!(target: "rtengine", thread = %id, "thread created");

    thread
  }

  /// Removes and returns every thread staged since the previous call.
  ///
  /// Each created thread is returned by exactly one call. Returns without
  /// locking while the roster is empty.
  pub fn take_new_threads(&self) -> Vec<ThreadRef> {
    if self.is_empty() {
      return Vec::new();
    }

    mem::take(&mut self.roster.lock().pending)
  }
}

impl Debug for ThreadRegistry {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("ThreadRegistry")
      .field("engine", &self.engine)
      .field("len", &self.len())
      .field("serial", &self.serial)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
