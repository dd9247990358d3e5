//! Exception handling for engine, context, thread, and message contracts.
//!
//! The runtime core has exactly two failure classes:
//!
//! 1. **Contract violations** are fatal. They are raised with [`raise!`]
//!    using the [`SysInv`] group and never returned as values. Kernel
//!    images are built with `panic = "abort"`, so a raise halts the system;
//!    hosted builds unwind, which lets tests observe the fault.
//! 2. **Interrupt-context exhaustion** is silent. A message pushed from an
//!    interrupt handler into a full mailbox is dropped; see
//!    [`Mailbox::push_message_irq`].
//!
//! # Exception Groups
//!
//! - [`BadArg`]: Invalid arguments while building the engine table
//! - [`SysInv`]: Broken usage contract
//!
//! [`BadArg`]: ExceptionGroup::BadArg
//! [`SysInv`]: ExceptionGroup::SysInv
//! [`Mailbox::push_message_irq`]: crate::thread::Mailbox::push_message_irq
//!
//! [`raise!`]: crate::raise!

mod exception;
mod exception_class;
mod exception_group;

pub use self::exception::Exception;
pub use self::exception_class::ExceptionClass;
pub use self::exception_group::ExceptionGroup;

// -----------------------------------------------------------------------------
// raise!
// -----------------------------------------------------------------------------

/// Raises an exception with the specified class, group, and message.
///
/// # Examples
///
/// ```should_panic
/// # use rtengine::raise;
/// raise!(Error, SysInv, "engine entered twice");
/// ```
#[macro_export]
macro_rules! raise {
  ($class:ident, $group:ident, $error:expr $(,)?) => {
    ::std::panic!(
      "{}",
      $crate::error::Exception::new(
        $crate::error::ExceptionClass::$class,
        $crate::error::ExceptionGroup::$group,
        $error,
      ),
    )
  };
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
