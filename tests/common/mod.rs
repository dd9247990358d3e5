#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rtengine::arch::CoreId;
use rtengine::arch::Cpu;
use rtengine::context::Quantum;
use rtengine::context::SchedRef;
use rtengine::context::ScriptHost;
use rtengine::context::TemplateCache;
use rtengine::context::ThreadManager;
use rtengine::thread::ThreadRef;

/// [`Cpu`] pinned to one core whose interrupt masking is a no-op.
pub struct FixedCpu {
  core: CoreId,
}

impl FixedCpu {
  pub const fn new(core: u32) -> Self {
    Self {
      core: CoreId::new(core),
    }
  }
}

impl Cpu for FixedCpu {
  fn id(&self) -> CoreId {
    self.core
  }

  fn wait_pause(&self) {}

  fn hang_system(&self) -> ! {
    panic!("halted");
  }

  fn save_and_disable_interrupts(&self) -> bool {
    true
  }

  fn restore_interrupts(&self, _previous: bool) {}
}

/// [`ThreadManager`] that counts admitted threads and exits after one
/// quantum.
pub struct IdleManager {
  threads: AtomicUsize,
}

impl ThreadManager for IdleManager {
  fn create_thread(&self, _name: &str, _thread: ThreadRef) -> SchedRef {
    SchedRef::new(self.threads.fetch_add(1, Ordering::SeqCst))
  }

  fn has_threads(&self) -> bool {
    self.threads.load(Ordering::SeqCst) > 0
  }

  fn run_quantum(&self) -> Quantum {
    Quantum::Exit
  }

  fn current_thread(&self) -> Option<ThreadRef> {
    None
  }
}

/// [`ScriptHost`] handing out [`IdleManager`]s.
pub struct IdleHost;

impl ScriptHost for IdleHost {
  fn create_manager(&self, _core: CoreId, _startup_script: bool) -> Box<dyn ThreadManager> {
    Box::new(IdleManager {
      threads: AtomicUsize::new(0),
    })
  }

  fn create_template_cache(&self, _core: CoreId) -> TemplateCache {
    Box::new(())
  }
}
