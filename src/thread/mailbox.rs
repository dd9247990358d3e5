//! Interrupt-safe message queue owned by an engine thread.
//!
//! A mailbox is shared by two calling conventions:
//!
//! - **Deferred**: ordinary kernel code. It may allocate, so the queue may
//!   grow, but it must mask local interrupts before taking the lock.
//!   Otherwise an interrupt arriving on the same core while the lock is held
//!   would spin on it forever.
//! - **Interrupt**: code running inside a hardware interrupt handler,
//!   proven by an [`IrqContext`]. Interrupts are already masked, so it only
//!   takes the lock. It must not allocate or free, so it can only fill slots
//!   that were reserved in advance.
//!
//! The queue lock is a spin lock. A contended lock never parks the caller,
//! which would block and allocate inside the handler.
//!
//! Every drain re-reserves [`EngineConfig::mailbox_reserve`] slots for the
//! next burst of messages.
//!
//! [`EngineConfig::mailbox_reserve`]: crate::config::EngineConfig::mailbox_reserve

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::mem;
use std::mem::ManuallyDrop;
use std::sync::Arc;
use tracing::trace;

use crate::arch::Cpu;
use crate::arch::IrqContext;
use crate::arch::NoInterrupts;
use crate::loom::sync::SpinMutex;
use crate::loom::sync::SpinMutexGuard;
use crate::loom::sync::atomic::AtomicUsize;
use crate::loom::sync::atomic::Ordering;
use crate::message::Message;

// -----------------------------------------------------------------------------
// Fixed Queue
// -----------------------------------------------------------------------------

/// View of the message queue that cannot grow its allocation.
///
/// This is the only access the interrupt path has to the queue.
#[repr(transparent)]
struct FixedQueue<'a> {
  inner: &'a mut Vec<Message>,
}

impl<'a> FixedQueue<'a> {
  #[inline]
  fn new(inner: &'a mut Vec<Message>) -> Self {
    Self { inner }
  }

  /// Appends `message` if a reserved slot is free, returning the new length.
  ///
  /// Gives `message` back if the queue is at capacity.
  #[inline]
  fn try_push(&mut self, message: Message) -> Result<usize, Message> {
    if self.inner.len() < self.inner.capacity() {
      self.inner.push(message);
      Ok(self.inner.len())
    } else {
      Err(message)
    }
  }
}

// -----------------------------------------------------------------------------
// Mailbox
// -----------------------------------------------------------------------------

/// FIFO queue of [`Message`]s with one deferred and one interrupt push path.
pub struct Mailbox {
  cpu: Arc<dyn Cpu>,
  reserve: usize,
  queued: AtomicUsize,
  dropped: AtomicUsize,
  queue: SpinMutex<Vec<Message>>,
}

impl Mailbox {
  /// Creates a new, empty mailbox with `reserve` pre-allocated slots.
  ///
  /// The reserved slots are immediately available to the interrupt path.
  pub fn new(cpu: Arc<dyn Cpu>, reserve: usize) -> Self {
    Self {
      cpu,
      reserve,
      queued: AtomicUsize::new(0),
      dropped: AtomicUsize::new(0),
      queue: SpinMutex::new(Vec::with_capacity(reserve)),
    }
  }

  /// Returns the number of queued messages.
  ///
  /// The value may be stale as soon as it is read.
  #[inline]
  pub fn len(&self) -> usize {
    self.queued.load(Ordering::Acquire)
  }

  /// Returns `true` if no message is queued.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the number of messages the queue holds without reallocating.
  pub fn capacity(&self) -> usize {
    let _irq: NoInterrupts<'_> = NoInterrupts::new(&*self.cpu);
    let queue: SpinMutexGuard<'_, Vec<Message>> = self.queue.lock();

    queue.capacity()
  }

  /// Returns the number of messages dropped by [`push_message_irq`] because
  /// no reserved slot was free.
  ///
  /// [`push_message_irq`]: Self::push_message_irq
  #[inline]
  pub fn dropped(&self) -> usize {
    self.dropped.load(Ordering::Relaxed)
  }

  /// Removes and returns every queued message, oldest first.
  ///
  /// The drain is atomic with respect to concurrent pushes: each message
  /// is returned by exactly one drain. Must not be called from an interrupt
  /// handler, since it masks interrupts and allocates the next reserve.
  pub fn take_messages(&self) -> Vec<Message> {
    if self.is_empty() {
      return Vec::new();
    }

    let messages: Vec<Message> = {
      let _irq: NoInterrupts<'_> = NoInterrupts::new(&*self.cpu);
      let mut queue: SpinMutexGuard<'_, Vec<Message>> = self.queue.lock();

      if queue.is_empty() {
        return Vec::new();
      }

      let messages: Vec<Message> = mem::take(&mut *queue);

      queue.reserve(self.reserve);
      self.queued.store(0, Ordering::Release);

      messages
    };

    trace!(target: "rtengine", count = messages.len(), "mailbox drained");

    messages
  }

  /// Appends `message` to the queue, growing it if needed.
  ///
  /// Must not be called from an interrupt handler; use
  /// [`push_message_irq`] there instead.
  ///
  /// [`push_message_irq`]: Self::push_message_irq
  pub fn push_message(&self, message: Message) {
    let _irq: NoInterrupts<'_> = NoInterrupts::new(&*self.cpu);
    let mut queue: SpinMutexGuard<'_, Vec<Message>> = self.queue.lock();

    queue.push(message);

    self.queued.store(queue.len(), Ordering::Release);
  }

  /// Appends `message` to the queue from an interrupt handler.
  ///
  /// Never allocates, frees, or blocks, and never touches the interrupt
  /// flag. If every reserved slot is taken the message is dropped without
  /// running its destructor, so its payload and sender handle are leaked;
  /// the handler has no way to act on a failure. Drops are counted in
  /// [`dropped`].
  ///
  /// [`dropped`]: Self::dropped
  pub fn push_message_irq(&self, _irq: &IrqContext, message: Message) {
    let mut queue: SpinMutexGuard<'_, Vec<Message>> = self.queue.lock();

    match FixedQueue::new(&mut queue).try_push(message) {
      Ok(len) => {
        self.queued.store(len, Ordering::Release);
      }
      Err(message) => {
        let _leaked: ManuallyDrop<Message> = ManuallyDrop::new(message);
        self.dropped.fetch_add(1, Ordering::Relaxed);
      }
    }
  }
}

impl Debug for Mailbox {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Mailbox")
      .field("queued", &self.len())
      .field("dropped", &self.dropped())
      .field("reserve", &self.reserve)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
