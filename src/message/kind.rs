use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// The fixed set of message kinds understood by engine threads.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageKind {
  #[default]
  Empty,
  /// Replaces the arguments a thread was started with.
  SetArguments,
  /// Requests evaluation of the payload as source code.
  Evaluate,
  /// A timer registered by the receiving thread has fired.
  TimeoutEvent,
  /// A hardware interrupt the receiving thread subscribed to was raised.
  IrqRaise,
  /// Calls an exported function of the receiving thread.
  FunctionCall,
  /// Fulfils a pending call made by the receiving thread.
  FunctionReturnResolve,
  /// Rejects a pending call made by the receiving thread.
  FunctionReturnReject,
}

impl MessageKind {
  /// Returns `true` if messages of this kind carry an exported function.
  #[inline]
  pub const fn is_call(self) -> bool {
    matches!(self, Self::FunctionCall)
  }

  /// Returns `true` if this kind answers an earlier function call.
  #[inline]
  pub const fn is_return(self) -> bool {
    matches!(self, Self::FunctionReturnResolve | Self::FunctionReturnReject)
  }

  #[inline]
  const fn label(self) -> &'static str {
    match self {
      Self::Empty => "empty",
      Self::SetArguments => "set-arguments",
      Self::Evaluate => "evaluate",
      Self::TimeoutEvent => "timeout-event",
      Self::IrqRaise => "irq-raise",
      Self::FunctionCall => "function-call",
      Self::FunctionReturnResolve => "function-return-resolve",
      Self::FunctionReturnReject => "function-return-reject",
    }
  }
}

impl Display for MessageKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str(self.label())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
