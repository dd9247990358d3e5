//! Typed, move-only envelopes delivered between engine threads.

mod function;
mod kind;
mod message;
mod payload;

pub use self::function::FunctionRef;
pub use self::kind::MessageKind;
pub use self::message::Message;
pub use self::payload::TransportData;
