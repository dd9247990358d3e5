use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::marker::PhantomData;

use crate::arch::Cpu;

// -----------------------------------------------------------------------------
// IRQ Context
// -----------------------------------------------------------------------------

/// Proof that the holder is executing inside a hardware interrupt handler.
///
/// Interrupt delivery is masked by the hardware on handler entry, so code
/// holding this token may take locks shared with non-interrupt code without
/// masking again. The token is `!Send` and `!Sync`; it cannot escape the
/// handler's stack frame onto another thread.
pub struct IrqContext {
  marker: PhantomData<*mut ()>,
}

impl IrqContext {
  /// Creates a new `IrqContext`.
  ///
  /// # Safety
  ///
  /// The caller must be a hardware interrupt handler running with local
  /// interrupt delivery masked, and the token must not outlive the handler.
  #[inline]
  pub const unsafe fn new() -> Self {
    Self {
      marker: PhantomData,
    }
  }
}

impl Debug for IrqContext {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str("IrqContext(..)")
  }
}

// -----------------------------------------------------------------------------
// No Interrupts
// -----------------------------------------------------------------------------

/// Scope guard masking interrupt delivery on the current core.
///
/// The previous interrupt state is restored on drop, so scopes nest.
#[must_use = "interrupts are restored as soon as the scope is dropped"]
pub struct NoInterrupts<'cpu> {
  cpu: &'cpu dyn Cpu,
  previous: bool,
  marker: PhantomData<*mut ()>,
}

impl<'cpu> NoInterrupts<'cpu> {
  /// Masks local interrupts until the returned scope is dropped.
  #[inline]
  pub fn new(cpu: &'cpu dyn Cpu) -> Self {
    let previous: bool = cpu.save_and_disable_interrupts();

    Self {
      cpu,
      previous,
      marker: PhantomData,
    }
  }
}

impl Drop for NoInterrupts<'_> {
  #[inline]
  fn drop(&mut self) {
    self.cpu.restore_interrupts(self.previous);
  }
}

impl Debug for NoInterrupts<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f
      .debug_struct("NoInterrupts")
      .field("previous", &self.previous)
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
