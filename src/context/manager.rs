use std::any::Any;

use crate::arch::CoreId;
use crate::thread::ThreadRef;

/// Script-engine state cached per execution context, such as compiled
/// code templates.
///
/// The engines never look inside the cache; they only own it.
pub type TemplateCache = Box<dyn Any + Send + Sync>;

// -----------------------------------------------------------------------------
// Sched Ref
// -----------------------------------------------------------------------------

/// Opaque reference to a thread inside a [`ThreadManager`].
///
/// Handed out by [`ThreadManager::create_thread`] and recorded on the
/// engine thread it was created for.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SchedRef {
  bits: usize,
}

impl SchedRef {
  /// Creates a new `SchedRef` from the manager's raw thread reference.
  #[inline]
  pub const fn new(bits: usize) -> Self {
    Self { bits }
  }

  /// Returns the manager's raw thread reference.
  #[inline]
  pub const fn get(self) -> usize {
    self.bits
  }
}

// -----------------------------------------------------------------------------
// Quantum
// -----------------------------------------------------------------------------

/// Outcome of one [`ThreadManager::run_quantum`] call.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Quantum {
  /// The manager has more work; call `run_quantum` again.
  Continue,
  /// The manager's run loop is finished.
  Exit,
}

// -----------------------------------------------------------------------------
// Thread Manager
// -----------------------------------------------------------------------------

/// The scheduler driving engine threads on one core.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability. The manager may call back into the engine (for example
/// through [`Engine::thread_local_get`]) while running a quantum.
///
/// [`Engine::thread_local_get`]: crate::engine::Engine::thread_local_get
pub trait ThreadManager: Send + Sync {
  /// Creates a schedulable thread for `thread` and returns its reference.
  fn create_thread(&self, name: &str, thread: ThreadRef) -> SchedRef;

  /// Returns `true` if the manager has at least one thread to run.
  fn has_threads(&self) -> bool;

  /// Runs one scheduling quantum.
  fn run_quantum(&self) -> Quantum;

  /// Returns the thread running right now, if any.
  fn current_thread(&self) -> Option<ThreadRef>;
}

// -----------------------------------------------------------------------------
// Script Host
// -----------------------------------------------------------------------------

/// Factory for the script-engine pieces owned by each execution context.
pub trait ScriptHost: Send + Sync {
  /// Builds the isolate and thread manager for `core`.
  ///
  /// `startup_script` is `true` on the bootstrap core only.
  fn create_manager(&self, core: CoreId, startup_script: bool) -> Box<dyn ThreadManager>;

  /// Builds the template cache for `core`.
  ///
  /// Called at most once per context, from [`ExecutionContext::init`].
  ///
  /// [`ExecutionContext::init`]: crate::context::ExecutionContext::init
  fn create_template_cache(&self, core: CoreId) -> TemplateCache;
}
