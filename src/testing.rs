//! Test doubles for the CPU and the script engine.

use std::any::Any;
use std::ops::Deref;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use parking_lot::Mutex;
use parking_lot::MutexGuard;

use crate::arch::CoreId;
use crate::arch::Cpu;
use crate::config::EngineConfig;
use crate::context::Quantum;
use crate::context::SchedRef;
use crate::context::ScriptHost;
use crate::context::TemplateCache;
use crate::context::ThreadManager;
use crate::engine::EngineMode;
use crate::engine::Engines;
use crate::thread::ThreadRef;
use crate::thread::ThreadStatus;

// -----------------------------------------------------------------------------
// Test CPU
// -----------------------------------------------------------------------------

/// [`Cpu`] that records interrupt masking and panics instead of blocking.
pub(crate) struct TestCpu {
  core: AtomicU32,
  enabled: AtomicBool,
  masks: AtomicUsize,
  pauses: AtomicUsize,
}

impl TestCpu {
  pub(crate) const PAUSE_LIMIT: usize = 3;

  pub(crate) fn new(core: u32) -> Self {
    Self {
      core: AtomicU32::new(core),
      enabled: AtomicBool::new(true),
      masks: AtomicUsize::new(0),
      pauses: AtomicUsize::new(0),
    }
  }

  pub(crate) fn set_core(&self, core: u32) {
    self.core.store(core, Ordering::SeqCst);
  }

  pub(crate) fn interrupts_enabled(&self) -> bool {
    self.enabled.load(Ordering::SeqCst)
  }

  /// Returns how many times interrupts were masked.
  pub(crate) fn masks(&self) -> usize {
    self.masks.load(Ordering::SeqCst)
  }

  pub(crate) fn pauses(&self) -> usize {
    self.pauses.load(Ordering::SeqCst)
  }
}

impl Cpu for TestCpu {
  fn id(&self) -> CoreId {
    CoreId::new(self.core.load(Ordering::SeqCst))
  }

  fn wait_pause(&self) {
    if self.pauses.fetch_add(1, Ordering::SeqCst) + 1 >= Self::PAUSE_LIMIT {
      panic!("paused");
    }
  }

  fn hang_system(&self) -> ! {
    panic!("halted");
  }

  fn save_and_disable_interrupts(&self) -> bool {
    self.masks.fetch_add(1, Ordering::SeqCst);
    self.enabled.swap(false, Ordering::SeqCst)
  }

  fn restore_interrupts(&self, previous: bool) {
    self.enabled.store(previous, Ordering::SeqCst);
  }
}

// -----------------------------------------------------------------------------
// Test Manager
// -----------------------------------------------------------------------------

type Task = Box<dyn FnOnce() + Send>;

/// [`ThreadManager`] that records admissions and runs a fixed number of
/// quanta.
pub(crate) struct TestManager {
  core: CoreId,
  startup_script: bool,
  quanta: AtomicUsize,
  quanta_run: AtomicUsize,
  created: Mutex<Vec<(String, ThreadRef)>>,
  current: Mutex<Option<ThreadRef>>,
  tasks: Mutex<Vec<Task>>,
}

impl TestManager {
  fn new(core: CoreId, startup_script: bool) -> Self {
    Self {
      core,
      startup_script,
      quanta: AtomicUsize::new(1),
      quanta_run: AtomicUsize::new(0),
      created: Mutex::new(Vec::new()),
      current: Mutex::new(None),
      tasks: Mutex::new(Vec::new()),
    }
  }

  pub(crate) fn core(&self) -> CoreId {
    self.core
  }

  pub(crate) fn startup_script(&self) -> bool {
    self.startup_script
  }

  /// Makes the run loop exit on the `quanta`-th quantum.
  pub(crate) fn set_quanta(&self, quanta: usize) {
    self.quanta.store(quanta, Ordering::SeqCst);
  }

  pub(crate) fn quanta_run(&self) -> usize {
    self.quanta_run.load(Ordering::SeqCst)
  }

  /// Queues `task` to run during the next quantum.
  pub(crate) fn on_quantum<F>(&self, task: F)
  where
    F: FnOnce() + Send + 'static,
  {
    self.tasks.lock().push(Box::new(task));
  }

  pub(crate) fn set_current(&self, thread: Option<ThreadRef>) {
    *self.current.lock() = thread;
  }

  pub(crate) fn created(&self) -> Vec<(String, ThreadRef)> {
    self.created.lock().clone()
  }
}

impl ThreadManager for Arc<TestManager> {
  fn create_thread(&self, name: &str, thread: ThreadRef) -> SchedRef {
    let mut created: MutexGuard<'_, Vec<(String, ThreadRef)>> = self.created.lock();
    let sched: SchedRef = SchedRef::new(created.len());

    thread.set_status(ThreadStatus::NotStarted);
    created.push((name.to_owned(), thread));

    sched
  }

  fn has_threads(&self) -> bool {
    !self.created.lock().is_empty()
  }

  fn run_quantum(&self) -> Quantum {
    let tasks: Vec<Task> = std::mem::take(&mut *self.tasks.lock());

    for task in tasks {
      task();
    }

    for (_, thread) in self.created.lock().iter() {
      thread.set_status(ThreadStatus::Running);
    }

    let run: usize = self.quanta_run.fetch_add(1, Ordering::SeqCst) + 1;

    if run >= self.quanta.load(Ordering::SeqCst) {
      Quantum::Exit
    } else {
      Quantum::Continue
    }
  }

  fn current_thread(&self) -> Option<ThreadRef> {
    self.current.lock().clone()
  }
}

// -----------------------------------------------------------------------------
// Test Host
// -----------------------------------------------------------------------------

/// [`ScriptHost`] handing out [`TestManager`]s.
///
/// Template caches hold the core they were built for.
pub(crate) struct TestHost {
  managers: Mutex<Vec<Arc<TestManager>>>,
  caches: AtomicUsize,
}

impl TestHost {
  pub(crate) fn new() -> Self {
    Self {
      managers: Mutex::new(Vec::new()),
      caches: AtomicUsize::new(0),
    }
  }

  /// Returns the `index`-th manager created by this host.
  pub(crate) fn manager(&self, index: usize) -> Arc<TestManager> {
    Arc::clone(&self.managers.lock()[index])
  }

  pub(crate) fn caches(&self) -> usize {
    self.caches.load(Ordering::SeqCst)
  }
}

impl ScriptHost for TestHost {
  fn create_manager(&self, core: CoreId, startup_script: bool) -> Box<dyn ThreadManager> {
    let manager: Arc<TestManager> = Arc::new(TestManager::new(core, startup_script));

    self.managers.lock().push(Arc::clone(&manager));

    Box::new(manager)
  }

  fn create_template_cache(&self, core: CoreId) -> TemplateCache {
    self.caches.fetch_add(1, Ordering::SeqCst);
    Box::new(core)
  }
}

// -----------------------------------------------------------------------------
// Test Engines
// -----------------------------------------------------------------------------

/// An [`Engines`] table backed by a [`TestCpu`] and a [`TestHost`].
pub(crate) struct TestEngines {
  engines: Engines,
}

impl TestEngines {
  /// Creates a table of `cores` execution-mode engines.
  pub(crate) fn execution(cores: usize) -> Self {
    let modes: Vec<EngineMode> = vec![EngineMode::Execution; cores];
    let engines: Engines = Engines::new(
      EngineConfig::new(),
      Arc::new(TestCpu::new(0)),
      Arc::new(TestHost::new()),
      &modes,
    );

    Self { engines }
  }

  /// Creates a thread on the engine of core `index`.
  pub(crate) fn create_thread(&self, index: u32) -> ThreadRef {
    match self.engines.get(CoreId::new(index)) {
      Some(engine) => engine.threads().create(),
      None => panic!("no engine for core {index}"),
    }
  }
}

impl Deref for TestEngines {
  type Target = Engines;

  fn deref(&self) -> &Self::Target {
    &self.engines
  }
}

// -----------------------------------------------------------------------------
// Assertions
// -----------------------------------------------------------------------------

/// Asserts that `f` panics with a message containing `expected`.
#[track_caller]
pub(crate) fn assert_raises<F, R>(expected: &str, f: F)
where
  F: FnOnce() -> R,
{
  let error: Box<dyn Any + Send> = match panic::catch_unwind(AssertUnwindSafe(f)) {
    Ok(_) => panic!("expected a panic containing {expected:?}"),
    Err(error) => error,
  };

  let message: &str = if let Some(message) = error.downcast_ref::<String>() {
    message
  } else if let Some(message) = error.downcast_ref::<&'static str>() {
    message
  } else {
    panic!("panic payload is not a string");
  };

  assert!(
    message.contains(expected),
    "expected a panic containing {expected:?}, got {message:?}",
  );
}
