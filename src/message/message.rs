use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::message::FunctionRef;
use crate::message::MessageKind;
use crate::message::TransportData;
use crate::raise;
use crate::thread::ThreadRef;

/// A message delivered to an engine thread.
///
/// Messages are move-only: the constructing caller owns a message until it is
/// pushed into a [`Mailbox`], the mailbox owns it until it is drained, and the
/// draining thread owns it afterwards. There is no `Clone` implementation, so
/// a message is delivered at most once.
///
/// No field is validated at construction. The sender and exported function
/// are checked when they are read.
///
/// [`Mailbox`]: crate::thread::Mailbox
pub struct Message {
  kind: MessageKind,
  sender: ThreadRef,
  data: TransportData,
  function: Option<FunctionRef>,
  recv_index: usize,
  reusable: bool,
}

impl Message {
  /// Creates a new `Message`.
  #[inline]
  pub fn new(
    kind: MessageKind,
    sender: ThreadRef,
    data: TransportData,
    function: Option<FunctionRef>,
    recv_index: usize,
  ) -> Self {
    Self {
      kind,
      sender,
      data,
      function,
      recv_index,
      reusable: false,
    }
  }

  /// Creates a new `Message` without a sender, payload, or function.
  ///
  /// Used for notifications raised by the system rather than by a thread,
  /// such as [`MessageKind::IrqRaise`].
  #[inline]
  pub const fn notify(kind: MessageKind, recv_index: usize) -> Self {
    Self {
      kind,
      sender: ThreadRef::empty(),
      data: TransportData::empty(),
      function: None,
      recv_index,
      reusable: false,
    }
  }

  /// Returns the message kind.
  #[inline]
  pub const fn kind(&self) -> MessageKind {
    self.kind
  }

  /// Returns a reference to the message payload.
  #[inline]
  pub const fn data(&self) -> &TransportData {
    &self.data
  }

  /// Consumes the message, returning its payload.
  #[inline]
  pub fn into_data(self) -> TransportData {
    self.data
  }

  /// Returns the thread that sent this message.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the message was built without a sender.
  #[inline]
  pub fn sender(&self) -> &ThreadRef {
    if self.sender.is_empty() {
      raise!(Error, SysInv, "message has no sender");
    }

    &self.sender
  }

  /// Returns the exported function targeted by a call message.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception unless this is a [`FunctionCall`] message
  /// built with a function reference.
  ///
  /// [`FunctionCall`]: MessageKind::FunctionCall
  #[inline]
  pub fn exported_function(&self) -> FunctionRef {
    if !self.kind.is_call() {
      raise!(Error, SysInv, format!("{} message has no exported function", self.kind));
    }

    let Some(function) = self.function else {
      raise!(Error, SysInv, "call message has no exported function");
    };

    function
  }

  /// Returns the index disambiguating pending calls addressed to the
  /// receiving thread.
  #[inline]
  pub const fn receiver_index(&self) -> usize {
    self.recv_index
  }

  /// Marks delivery as complete; the message may now be recycled.
  #[inline]
  pub fn mark_reusable(&mut self) {
    self.reusable = true;
  }

  /// Returns `true` if delivery of this message is complete.
  #[inline]
  pub const fn is_reusable(&self) -> bool {
    self.reusable
  }
}

impl Debug for Message {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Message")
      .field("kind", &self.kind)
      .field("sender", &self.sender)
      .field("data", &self.data)
      .field("function", &self.function)
      .field("recv_index", &self.recv_index)
      .field("reusable", &self.reusable)
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
