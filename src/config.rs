use crate::arch::CoreId;
use crate::consts;

// -----------------------------------------------------------------------------
// Admission
// -----------------------------------------------------------------------------

/// When an execution context admits threads created through its registry.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Admission {
  /// Admit pending threads once, before the run loop starts.
  ///
  /// Threads created after the run loop has started stay pending.
  Startup,
  /// Admit pending threads before the run loop starts and again after
  /// every scheduling quantum.
  EveryQuantum,
}

// -----------------------------------------------------------------------------
// Engine Config
// -----------------------------------------------------------------------------

/// Configuration shared by every engine in an [`Engines`] table.
///
/// [`Engines`]: crate::engine::Engines
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EngineConfig {
  // ---------------------------------------------------------------------------
  // Engine Configuration
  // ---------------------------------------------------------------------------
  pub admission: Admission,
  pub bootstrap_core: CoreId,
  pub mailbox_reserve: usize,
  // ---------------------------------------------------------------------------
  // Tracing Subscriber Configuration
  // ---------------------------------------------------------------------------
  pub tracing_source_file: bool,
  pub tracing_source_line: bool,
  pub tracing_source_name: bool,
  pub tracing_thread_info: bool,
  pub tracing_verbose: bool,
  pub tracing_very_verbose: bool,
}

impl EngineConfig {
  #[inline]
  pub fn new() -> Self {
    Self {
      admission: Admission::EveryQuantum,
      bootstrap_core: consts::BOOTSTRAP_CORE,
      mailbox_reserve: consts::CAP_MAILBOX_RESERVE,
      tracing_source_file: false,
      tracing_source_line: false,
      tracing_source_name: false,
      tracing_thread_info: true,
      tracing_verbose: true,
      tracing_very_verbose: false,
    }
  }

  #[inline]
  pub const fn tracing_filter(&self) -> tracing::Level {
    if self.tracing_very_verbose {
      tracing::Level::TRACE
    } else if self.tracing_verbose {
      tracing::Level::DEBUG
    } else {
      tracing::Level::INFO
    }
  }
}

impl Default for EngineConfig {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
