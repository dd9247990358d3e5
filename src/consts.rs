//! Engine configuration defaults.

use crate::arch::CoreId;

// -----------------------------------------------------------------------------
// Engine Startup
// -----------------------------------------------------------------------------

/// Core whose execution engine is allowed to run the startup script.
pub const BOOTSTRAP_CORE: CoreId = CoreId::new(1);

/// Name given to threads admitted into a thread manager.
///
/// Engine threads are anonymous; the thread manager assigns display names
/// on its own if it needs them.
pub const ADMITTED_THREAD_NAME: &str = "";

// -----------------------------------------------------------------------------
// Memory Allocation
// -----------------------------------------------------------------------------

/// Number of message slots reserved in a mailbox after every drain.
///
/// Interrupt handlers can only deliver into reserved slots, so this also
/// bounds the number of interrupt-delivered messages between two drains.
pub const CAP_MAILBOX_RESERVE: usize = 128;

/// Number of pre-allocated entries in a local storage table.
pub const CAP_LOCAL_STORAGE: usize = 8;

/// Number of pre-allocated entries in a thread registry roster.
pub const CAP_REGISTRY_ROSTER: usize = 16;
