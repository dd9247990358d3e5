use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::sync::Arc;
use std::sync::OnceLock;
use tracing::info;

use crate::arch::CoreId;
use crate::arch::Cpu;
use crate::arch::IrqContext;
use crate::config::EngineConfig;
use crate::context::ExecutionContext;
use crate::context::ScriptHost;
use crate::engine::EngineMode;
use crate::engine::ThreadRegistry;
use crate::loom::sync::Mutex;
use crate::loom::sync::atomic::AtomicBool;
use crate::loom::sync::atomic::Ordering;
use crate::raise;
use crate::thread::LocalStorage;
use crate::thread::ThreadRef;

/// The runtime controller of one CPU core.
///
/// An engine is built for every core at boot and entered exactly once, on
/// its own core, with [`enter`]. What happens then depends on its
/// [`EngineMode`]. Threads may be created through [`threads`] from any
/// core at any time, including before the engine is entered.
///
/// [`enter`]: Self::enter
/// [`threads`]: Self::threads
pub struct Engine {
  id: CoreId,
  mode: EngineMode,
  init: AtomicBool,
  config: Arc<EngineConfig>,
  cpu: Arc<dyn Cpu>,
  host: Arc<dyn ScriptHost>,
  threads: triomphe::Arc<ThreadRegistry>,
  context: OnceLock<ExecutionContext>,
  bootstrap: Mutex<LocalStorage>,
}

impl Engine {
  pub(crate) fn new(
    id: CoreId,
    mode: EngineMode,
    config: Arc<EngineConfig>,
    cpu: Arc<dyn Cpu>,
    host: Arc<dyn ScriptHost>,
  ) -> Self {
    let threads: ThreadRegistry = ThreadRegistry::new(id, Arc::clone(&cpu), config.mailbox_reserve);

    Self {
      id,
      mode,
      init: AtomicBool::new(false),
      config,
      cpu,
      host,
      threads: triomphe::Arc::new(threads),
      context: OnceLock::new(),
      bootstrap: Mutex::new(LocalStorage::new()),
    }
  }

  /// Returns the core this engine belongs to.
  #[inline]
  pub const fn id(&self) -> CoreId {
    self.id
  }

  /// Returns the mode fixed at construction.
  #[inline]
  pub const fn mode(&self) -> EngineMode {
    self.mode
  }

  /// Returns `true` once [`enter`] has been called.
  ///
  /// [`enter`]: Self::enter
  #[inline]
  pub fn is_init(&self) -> bool {
    self.init.load(Ordering::Acquire)
  }

  /// Returns the registry of threads owned by this engine.
  #[inline]
  pub fn threads(&self) -> &ThreadRegistry {
    &self.threads
  }

  /// Returns the execution context, if one was built.
  #[inline]
  pub fn try_context(&self) -> Option<&ExecutionContext> {
    self.context.get()
  }

  /// Returns the execution context.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the engine has no execution context.
  #[inline]
  pub fn context(&self) -> &ExecutionContext {
    match self.context.get() {
      Some(context) => context,
      None => raise!(Error, SysInv, format!("engine {} has no execution context", self.id)),
    }
  }

  /// Runs the engine on the current core.
  ///
  /// - [`Disabled`] halts the core.
  /// - [`Service`] idles forever, servicing interrupts.
  /// - [`Execution`] builds the execution context and runs its loop. Returns
  ///   only if the thread manager exits.
  ///
  /// The template cache is not built here; the boot stack may be too small.
  /// The thread manager calls [`ExecutionContext::init`] from a thread stack.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the engine was already entered, if it
  /// already has an execution context, or if the current core is not the
  /// engine's core.
  ///
  /// [`Disabled`]: EngineMode::Disabled
  /// [`Service`]: EngineMode::Service
  /// [`Execution`]: EngineMode::Execution
  pub fn enter(&self) {
    if self.init.swap(true, Ordering::AcqRel) {
      raise!(Error, SysInv, format!("engine {} entered twice", self.id));
    }

    if self.context.get().is_some() {
      raise!(Error, SysInv, format!("engine {} already has an execution context", self.id));
    }

    let core: CoreId = self.cpu.id();

    if core != self.id {
      raise!(Error, SysInv, format!("engine {} entered on {core}", self.id));
    }

    info!(target: "rtengine", %core, mode = %self.mode, "engine entered");

    match self.mode {
      EngineMode::Disabled => self.cpu.hang_system(),
      EngineMode::Service => loop {
        self.cpu.wait_pause();
      },
      EngineMode::Execution => {
        let startup_script: bool = core == self.config.bootstrap_core;

        let context: &ExecutionContext = self.context.get_or_init(|| {
          ExecutionContext::new(
            core,
            startup_script,
            &self.config,
            Arc::clone(&self.host),
            self.threads.clone(),
          )
        });

        context.enter();
      }
    }
  }

  /// Forwards a timer interrupt to the execution context, if any.
  ///
  /// Never blocks, allocates, or logs.
  #[inline]
  pub fn timer_tick(&self, _irq: &IrqContext) {
    if let Some(context) = self.context.get() {
      context.timer_interrupt_notify();
    }
  }

  /// Returns the value stored under `key` in the current thread's local
  /// storage.
  ///
  /// Before an execution context exists the engine's bootstrap storage is
  /// used instead.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if a context exists but no thread is
  /// running.
  pub fn thread_local_get(&self, key: u64) -> Option<usize> {
    match self.current_thread() {
      Some(thread) => thread.with_local_storage(|storage| storage.get(key)),
      None => self.bootstrap.lock().get(key),
    }
  }

  /// Stores `value` under `key` in the current thread's local storage.
  ///
  /// Before an execution context exists the engine's bootstrap storage is
  /// used instead.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if a context exists but no thread is
  /// running.
  pub fn thread_local_set(&self, key: u64, value: usize) {
    match self.current_thread() {
      Some(thread) => {
        thread.with_local_storage(|storage| storage.set(key, value));
      }
      None => {
        self.bootstrap.lock().set(key, value);
      }
    }
  }

  /// Resolves the thread whose local storage is in use, or `None` for the
  /// bootstrap storage.
  fn current_thread(&self) -> Option<ThreadRef> {
    let context: &ExecutionContext = self.context.get()?;

    match context.current_thread() {
      Some(thread) => Some(thread),
      None => raise!(Error, SysInv, format!("no thread running on {}", self.id)),
    }
  }
}

impl Debug for Engine {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Engine")
      .field("id", &self.id)
      .field("mode", &self.mode)
      .field("init", &self.is_init())
      .field("threads", &self.threads)
      .field("context", &self.context.get())
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
