//! Per-core engines and the table that holds them.

mod engine;
mod mode;
mod registry;
mod table;

pub use self::engine::Engine;
pub use self::mode::EngineMode;
pub use self::registry::ThreadRegistry;
pub use self::table::Engines;
