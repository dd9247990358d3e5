use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// What an engine does when its core enters it.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum EngineMode {
  /// The core is halted.
  #[default]
  Disabled,
  /// The core runs scripts through an [`ExecutionContext`].
  ///
  /// [`ExecutionContext`]: crate::context::ExecutionContext
  Execution,
  /// The core idles, waking only to service interrupts.
  Service,
}

impl EngineMode {
  /// Returns the lowercase name of the mode.
  #[inline]
  pub const fn label(self) -> &'static str {
    match self {
      Self::Disabled => "disabled",
      Self::Execution => "execution",
      Self::Service => "service",
    }
  }
}

impl Display for EngineMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str(self.label())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
