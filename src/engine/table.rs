use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::slice::Iter;
use std::sync::Arc;
use tracing::debug;

use crate::arch::CoreId;
use crate::arch::Cpu;
use crate::config::EngineConfig;
use crate::context::ScriptHost;
use crate::engine::Engine;
use crate::engine::EngineMode;
use crate::raise;

/// The core-indexed table of every engine in the system.
///
/// Built once at boot, before any core enters its engine. Engine `n`
/// belongs to core `n`.
pub struct Engines {
  cpu: Arc<dyn Cpu>,
  data: Box<[Engine]>,
}

impl Engines {
  /// Creates one engine per entry of `modes`.
  ///
  /// # Panics
  ///
  /// Raises a `BadArg` exception if `modes` is empty.
  pub fn new(
    config: EngineConfig,
    cpu: Arc<dyn Cpu>,
    host: Arc<dyn ScriptHost>,
    modes: &[EngineMode],
  ) -> Self {
    if modes.is_empty() {
      raise!(Error, BadArg, "engine table needs at least one core");
    }

    let config: Arc<EngineConfig> = Arc::new(config);

    let data: Box<[Engine]> = modes
      .iter()
      .zip(0_u32..)
      .map(|(mode, index)| {
        Engine::new(
          CoreId::new(index),
          *mode,
          Arc::clone(&config),
          Arc::clone(&cpu),
          Arc::clone(&host),
        )
      })
      .collect();

    debug!(target: "rtengine", cores = data.len(), "engine table created");

    Self { cpu, data }
  }

  /// Returns the engine of `core`, or `None` if there is no such core.
  #[inline]
  pub fn get(&self, core: CoreId) -> Option<&Engine> {
    self.data.get(core.index())
  }

  /// Returns the engine of the core executing the caller.
  ///
  /// # Panics
  ///
  /// Raises a `SysInv` exception if the current core has no engine.
  #[inline]
  pub fn current(&self) -> &Engine {
    let core: CoreId = self.cpu.id();

    match self.get(core) {
      Some(engine) => engine,
      None => raise!(Error, SysInv, format!("no engine for {core}")),
    }
  }

  /// Returns the number of engines.
  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// Returns `true` if the table has no engine.
  ///
  /// Always `false` for a constructed table.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Returns an iterator over the engines, in core order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, Engine> {
    self.data.iter()
  }
}

impl<'a> IntoIterator for &'a Engines {
  type Item = &'a Engine;
  type IntoIter = Iter<'a, Engine>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl Debug for Engines {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_list().entries(self.data.iter()).finish()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
