//! CPU primitives consumed by the engines.
//!
//! The engines never touch hardware directly. Everything they need from the
//! processor is expressed by the [`Cpu`] trait:
//!
//! - identify the current core
//! - idle-wait and halt
//! - save, mask, and restore local interrupt delivery
//!
//! Code that runs inside a hardware interrupt handler proves it with an
//! [`IrqContext`] token. Code outside a handler masks interrupts with a
//! [`NoInterrupts`] scope before taking any lock it shares with a handler.

mod core_id;
mod irq;

pub mod hosted;

pub use self::core_id::CoreId;
pub use self::irq::IrqContext;
pub use self::irq::NoInterrupts;

/// Processor operations required by the engines.
pub trait Cpu: Send + Sync {
  /// Returns the identifier of the core executing the caller.
  fn id(&self) -> CoreId;

  /// Waits for the next interrupt in a low-power state.
  fn wait_pause(&self);

  /// Stops the current core permanently.
  fn hang_system(&self) -> !;

  /// Masks interrupt delivery on the current core.
  ///
  /// Returns `true` if interrupts were enabled before the call.
  fn save_and_disable_interrupts(&self) -> bool;

  /// Restores the interrupt state returned by [`save_and_disable_interrupts`].
  ///
  /// [`save_and_disable_interrupts`]: Cpu::save_and_disable_interrupts
  fn restore_interrupts(&self, previous: bool);
}
