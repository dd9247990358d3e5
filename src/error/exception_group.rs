use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Exception category indicating the nature of the error.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExceptionGroup {
  /// Invalid argument supplied while building the engine table.
  BadArg,
  /// A usage contract of an engine, context, thread, or message was broken.
  ///
  /// Examples: entering an engine twice, reading the sender of a message
  /// that has none.
  SysInv,
}

impl ExceptionGroup {
  #[inline]
  pub const fn label(&self) -> &'static str {
    match self {
      Self::BadArg => "badarg",
      Self::SysInv => "sysinv",
    }
  }
}

impl Display for ExceptionGroup {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::BadArg => f.write_str("(BadArg) errors were found with the given argument(s)"),
      Self::SysInv => f.write_str("(SysInv) a system invariant has been broken"),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
