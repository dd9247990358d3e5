//! [`Cpu`] implementation for hosted builds.
//!
//! Each OS thread plays the role of one core. A thread adopts a core with
//! [`HostedCpu::bind_current`]; unbound threads report core `0`. Interrupt
//! masking is tracked per OS thread and has no effect beyond bookkeeping.

use std::cell::Cell;
use std::thread;

use crate::arch::CoreId;
use crate::arch::Cpu;

thread_local! {
  static CORE: Cell<u32> = const { Cell::new(0) };
  static IRQ_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Hosted stand-in for the processor.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostedCpu;

impl HostedCpu {
  /// Creates a new `HostedCpu`.
  #[inline]
  pub const fn new() -> Self {
    Self
  }

  /// Makes the calling OS thread report `core` as its core identifier.
  #[inline]
  pub fn bind_current(&self, core: CoreId) {
    CORE.with(|cell| cell.set(core.get()));
  }

  /// Returns `true` if interrupts are enabled on the calling OS thread.
  #[inline]
  pub fn interrupts_enabled(&self) -> bool {
    IRQ_ENABLED.with(Cell::get)
  }
}

impl Cpu for HostedCpu {
  #[inline]
  fn id(&self) -> CoreId {
    CoreId::new(CORE.with(Cell::get))
  }

  #[inline]
  fn wait_pause(&self) {
    thread::yield_now();
  }

  fn hang_system(&self) -> ! {
    loop {
      thread::park();
    }
  }

  #[inline]
  fn save_and_disable_interrupts(&self) -> bool {
    IRQ_ENABLED.with(|cell| cell.replace(false))
  }

  #[inline]
  fn restore_interrupts(&self, previous: bool) {
    IRQ_ENABLED.with(|cell| cell.set(previous));
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
