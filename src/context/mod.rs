//! Per-core execution contexts and the script-engine seams they drive.

mod context;
mod manager;

pub use self::context::ExecutionContext;
pub use self::manager::Quantum;
pub use self::manager::SchedRef;
pub use self::manager::ScriptHost;
pub use self::manager::TemplateCache;
pub use self::manager::ThreadManager;
