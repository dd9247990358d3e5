//! rtengine - Per-core runtime engines with interrupt-safe thread mailboxes.
//!
//! Every CPU core gets one [`Engine`], built at boot into a core-indexed
//! [`Engines`] table. When a core enters its engine it either halts, idles
//! servicing interrupts, or runs scripts through an [`ExecutionContext`].
//!
//! Scripts run in lightweight engine threads. Threads are created through
//! an engine's [`ThreadRegistry`] from any core, admitted into the core's
//! [`ThreadManager`] by the execution context, and exchange [`Message`]s
//! through per-thread [`Mailbox`]es. Interrupt handlers may deliver
//! messages too, without allocating or blocking.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rtengine::arch::hosted::HostedCpu;
//! use rtengine::config::EngineConfig;
//! use rtengine::context::ScriptHost;
//! use rtengine::engine::EngineMode;
//! use rtengine::engine::Engines;
//!
//! fn boot(host: Arc<dyn ScriptHost>) {
//!   let modes: [EngineMode; 2] = [EngineMode::Service, EngineMode::Execution];
//!   let engines: Engines = Engines::new(EngineConfig::new(), Arc::new(HostedCpu::new()), host, &modes);
//!
//!   engines.current().enter();
//! }
//! ```
//!
//! # Core Modules
//!
//! - [`engine`]: Engines, the engine table, and thread registries
//! - [`context`]: Execution contexts and the script-engine traits
//! - [`thread`]: Engine threads, handles, and mailboxes
//! - [`message`]: Messages and their payloads
//! - [`arch`]: CPU primitives and interrupt context
//! - [`error`]: Exception system
//! - [`config`]: Engine configuration
//!
//! [`Engine`]: crate::engine::Engine
//! [`Engines`]: crate::engine::Engines
//! [`ExecutionContext`]: crate::context::ExecutionContext
//! [`ThreadRegistry`]: crate::engine::ThreadRegistry
//! [`ThreadManager`]: crate::context::ThreadManager
//! [`Message`]: crate::message::Message
//! [`Mailbox`]: crate::thread::Mailbox

mod loom;

#[cfg(test)]
mod testing;

pub mod arch;
pub mod config;
pub mod consts;
pub mod context;
pub mod engine;
pub mod error;
pub mod init;
pub mod message;
pub mod thread;
