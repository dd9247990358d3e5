//! Process-wide setup shared by every engine.

use crate::config::EngineConfig;
use crate::error::Exception;

/// Installs the global tracing subscriber described by `config`.
///
/// Without the `tracing` feature this does nothing and always succeeds.
///
/// # Errors
///
/// Returns an exception if a global subscriber is already installed.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: &EngineConfig) -> Result<(), Exception> {
  use tracing_subscriber::FmtSubscriber;
  use tracing_subscriber::fmt::format;
  use tracing_subscriber::util::SubscriberInitExt;

  use crate::error::ExceptionClass;
  use crate::error::ExceptionGroup;

  FmtSubscriber::builder()
    .event_format(format().compact())
    .log_internal_errors(true)
    .with_ansi(true)
    .with_file(config.tracing_source_file)
    .with_level(true)
    .with_line_number(config.tracing_source_line)
    .with_max_level(config.tracing_filter())
    .with_target(config.tracing_source_name)
    .with_thread_ids(config.tracing_thread_info)
    .with_thread_names(config.tracing_thread_info)
    .finish()
    .try_init()
    .map_err(|error| Exception::new(ExceptionClass::Error, ExceptionGroup::SysInv, error))
}

/// Installs the global tracing subscriber described by `config`.
///
/// Without the `tracing` feature this does nothing and always succeeds.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn init_tracing(_config: &EngineConfig) -> Result<(), Exception> {
  Ok(())
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
