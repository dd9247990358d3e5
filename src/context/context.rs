use crossbeam_utils::CachePadded;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::sync::Arc;
use std::sync::OnceLock;
use tracing::debug;
use tracing::trace;

use crate::arch::CoreId;
use crate::config::Admission;
use crate::config::EngineConfig;
use crate::consts::ADMITTED_THREAD_NAME;
use crate::context::Quantum;
use crate::context::SchedRef;
use crate::context::ScriptHost;
use crate::context::TemplateCache;
use crate::context::ThreadManager;
use crate::engine::ThreadRegistry;
use crate::loom::sync::atomic::AtomicU64;
use crate::loom::sync::atomic::Ordering;
use crate::raise;
use crate::thread::ThreadRef;

/// The script-running half of an execution-mode engine.
///
/// A context is built once, on its own core, when the engine is entered.
/// It owns the core's [`ThreadManager`] and admits the threads staged in
/// the engine's [`ThreadRegistry`] into it.
pub struct ExecutionContext {
  core: CoreId,
  startup_script: bool,
  admission: Admission,
  host: Arc<dyn ScriptHost>,
  threads: triomphe::Arc<ThreadRegistry>,
  manager: Box<dyn ThreadManager>,
  template_cache: OnceLock<TemplateCache>,
  ticks: CachePadded<AtomicU64>,
}

impl ExecutionContext {
  pub(crate) fn new(
    core: CoreId,
    startup_script: bool,
    config: &EngineConfig,
    host: Arc<dyn ScriptHost>,
    threads: triomphe::Arc<ThreadRegistry>,
  ) -> Self {
    let manager: Box<dyn ThreadManager> = host.create_manager(core, startup_script);

    debug!(target: "rtengine", %core, startup_script, "execution context created");

    Self {
      core,
      startup_script,
      admission: config.admission,
      host,
      threads,
      manager,
      template_cache: OnceLock::new(),
      ticks: CachePadded::new(AtomicU64::new(0)),
    }
  }

  /// Returns the core this context is bound to.
  #[inline]
  pub const fn core(&self) -> CoreId {
    self.core
  }

  /// Returns `true` if this context runs the startup script.
  #[inline]
  pub const fn startup_script(&self) -> bool {
    self.startup_script
  }

  /// Returns the number of timer interrupts observed so far.
  #[inline]
  pub fn ticks(&self) -> u64 {
    self.ticks.load(Ordering::Relaxed)
  }

  /// Returns the template cache, if [`init`] has run.
  ///
  /// [`init`]: Self::init
  #[inline]
  pub fn template_cache(&self) -> Option<&TemplateCache> {
    self.template_cache.get()
  }

  /// Returns the registry this context admits threads from.
  #[inline]
  pub fn threads(&self) -> &ThreadRegistry {
    &self.threads
  }

  /// Builds the template cache on first call; later calls do nothing.
  ///
  /// Template construction is stack-hungry. The caller must be running on
  /// a stack large enough for the script host, not the boot stack, so
  /// [`Engine::enter`] leaves this to the thread manager.
  ///
  /// [`Engine::enter`]: crate::engine::Engine::enter
  pub fn init(&self) {
    self.template_cache.get_or_init(|| {
      debug!(target: "rtengine", core = %self.core, "building template cache");
      self.host.create_template_cache(self.core)
    });
  }

  /// Admits pending threads, then runs the thread manager until it exits.
  ///
  /// With [`Admission::EveryQuantum`], threads created while the loop is
  /// running are admitted after the quantum that observed them.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the manager has no thread to run.
  pub fn enter(&self) {
    self.process_new_threads();

    if !self.manager.has_threads() {
      raise!(Error, SysInv, format!("no threads to run on {}", self.core));
    }

    debug!(target: "rtengine", core = %self.core, admission = ?self.admission, "run loop started");

    loop {
      match self.manager.run_quantum() {
        Quantum::Continue => {
          if self.admission == Admission::EveryQuantum {
            self.process_new_threads();
          }
        }
        Quantum::Exit => break,
      }
    }

    debug!(target: "rtengine", core = %self.core, "run loop finished");
  }

  /// Admits every thread staged in the registry into the thread manager.
  ///
  /// Each thread is created in the manager with an empty name and the
  /// manager's reference is recorded on the thread. Returns the number of
  /// threads admitted.
  pub fn process_new_threads(&self) -> usize {
    let threads: Vec<ThreadRef> = self.threads.take_new_threads();

    if threads.is_empty() {
      return 0;
    }

    for thread in threads.iter() {
      let sched: SchedRef = self.manager.create_thread(ADMITTED_THREAD_NAME, thread.clone());

      trace!(target: "rtengine", thread = %thread.id(), sched = sched.get(), "thread admitted");

      thread.bind(sched);
    }

    debug!(target: "rtengine", core = %self.core, count = threads.len(), "threads admitted");

    threads.len()
  }

  /// Records one timer interrupt.
  ///
  /// Safe to call from an interrupt handler: never blocks or allocates.
  #[inline]
  pub fn timer_interrupt_notify(&self) {
    self.ticks.fetch_add(1, Ordering::Relaxed);
  }

  /// Returns the thread the manager is running right now, if any.
  #[inline]
  pub fn current_thread(&self) -> Option<ThreadRef> {
    self.manager.current_thread()
  }
}

impl Debug for ExecutionContext {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("ExecutionContext")
      .field("core", &self.core)
      .field("startup_script", &self.startup_script)
      .field("admission", &self.admission)
      .field("ticks", &self.ticks())
      .field("template_cache", &self.template_cache.get().is_some())
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;
  use crate::arch::Cpu;
  use crate::testing::TestCpu;
  use crate::testing::TestHost;
  use crate::testing::TestManager;
  use crate::testing::assert_raises;
  use crate::thread::ThreadStatus;

  struct Fixture {
    host: Arc<TestHost>,
    threads: triomphe::Arc<ThreadRegistry>,
    context: ExecutionContext,
  }

  impl Fixture {
    fn new(admission: Admission) -> Self {
      let cpu: Arc<dyn Cpu> = Arc::new(TestCpu::new(2));
      let host: Arc<TestHost> = Arc::new(TestHost::new());
      let threads: triomphe::Arc<ThreadRegistry> =
        triomphe::Arc::new(ThreadRegistry::new(CoreId::new(2), cpu, 16));

      let mut config: EngineConfig = EngineConfig::new();
      config.admission = admission;

      let context: ExecutionContext =
        ExecutionContext::new(CoreId::new(2), false, &config, host.clone(), threads.clone());

      Self {
        host,
        threads,
        context,
      }
    }

    fn manager(&self) -> Arc<TestManager> {
      self.host.manager(0)
    }
  }

  #[test]
  fn test_new_builds_manager() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);
    let manager: Arc<TestManager> = fixture.manager();

    assert_eq!(manager.core(), CoreId::new(2));
    assert!(!manager.startup_script());
    assert_eq!(fixture.context.core(), CoreId::new(2));
    assert_eq!(fixture.context.ticks(), 0);
    assert!(fixture.context.template_cache().is_none());
  }

  #[test]
  fn test_init_builds_cache_once() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);

    fixture.context.init();
    fixture.context.init();

    assert_eq!(fixture.host.caches(), 1);

    let cache: &TemplateCache = fixture.context.template_cache().unwrap();

    assert_eq!(cache.downcast_ref::<CoreId>(), Some(&CoreId::new(2)));
  }

  #[test]
  fn test_enter_admits_in_creation_order() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);
    let created: Vec<ThreadRef> = (0..3).map(|_| fixture.threads.create()).collect();

    fixture.context.enter();

    let manager: Arc<TestManager> = fixture.manager();
    let admitted: Vec<(String, ThreadRef)> = manager.created();

    assert_eq!(admitted.len(), 3);

    for (index, (name, thread)) in admitted.iter().enumerate() {
      assert_eq!(name, "");
      assert!(thread.ptr_eq(&created[index]));
      assert_eq!(thread.sched(), Some(SchedRef::new(index)));
    }

    assert_eq!(fixture.context.process_new_threads(), 0);
    assert_eq!(manager.created().len(), 3);
  }

  #[test]
  fn test_process_new_threads_counts() {
    let fixture: Fixture = Fixture::new(Admission::Startup);

    assert_eq!(fixture.context.process_new_threads(), 0);

    let _a: ThreadRef = fixture.threads.create();
    let _b: ThreadRef = fixture.threads.create();

    assert_eq!(fixture.context.process_new_threads(), 2);
    assert_eq!(fixture.context.process_new_threads(), 0);
  }

  #[test]
  fn test_enter_without_threads_raises() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);

    assert_raises("no threads to run on core2", || fixture.context.enter());
  }

  #[test]
  fn test_enter_runs_until_exit() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);
    let thread: ThreadRef = fixture.threads.create();

    fixture.manager().set_quanta(3);
    fixture.context.enter();

    assert_eq!(fixture.manager().quanta_run(), 3);
    assert!(thread.is_admitted());
    assert_eq!(thread.status(), ThreadStatus::Running);
  }

  #[test]
  fn test_enter_admits_every_quantum() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);
    let manager: Arc<TestManager> = fixture.manager();
    let threads: triomphe::Arc<ThreadRegistry> = fixture.threads.clone();

    let _first: ThreadRef = fixture.threads.create();

    manager.set_quanta(3);
    manager.on_quantum(move || {
      threads.create();
    });

    fixture.context.enter();

    assert_eq!(manager.created().len(), 2);
  }

  #[test]
  fn test_enter_admits_at_startup_only() {
    let fixture: Fixture = Fixture::new(Admission::Startup);
    let manager: Arc<TestManager> = fixture.manager();
    let threads: triomphe::Arc<ThreadRegistry> = fixture.threads.clone();

    let _first: ThreadRef = fixture.threads.create();

    manager.set_quanta(3);
    manager.on_quantum(move || {
      threads.create();
    });

    fixture.context.enter();

    assert_eq!(manager.created().len(), 1);
    assert_eq!(fixture.context.process_new_threads(), 1);
  }

  #[test]
  fn test_concurrent_ticks() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);

    thread::scope(|scope| {
      for _ in 0..5 {
        scope.spawn(|| fixture.context.timer_interrupt_notify());
      }
    });

    assert_eq!(fixture.context.ticks(), 5);
  }

  #[test]
  fn test_current_thread_delegates() {
    let fixture: Fixture = Fixture::new(Admission::EveryQuantum);
    let thread: ThreadRef = fixture.threads.create();

    assert!(fixture.context.current_thread().is_none());

    fixture.manager().set_current(Some(thread.clone()));

    assert_eq!(fixture.context.current_thread(), Some(thread));
  }
}
