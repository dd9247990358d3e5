//! Engine threads and their mailboxes.

mod handle;
mod local_storage;
mod mailbox;
mod serial;
mod status;
mod thread;
mod thread_id;

pub(crate) use self::serial::SerialCounter;
pub(crate) use self::status::AtomicStatus;

pub use self::handle::ThreadRef;
pub use self::local_storage::LocalStorage;
pub use self::mailbox::Mailbox;
pub use self::status::ThreadStatus;
pub use self::thread::EngineThread;
pub use self::thread_id::ThreadId;
