#![cfg(loom)]

#[path = "../common/mod.rs"]
mod common;

use loom::sync::Arc;
use loom::thread;
use rtengine::arch::CoreId;
use rtengine::arch::IrqContext;
use rtengine::config::EngineConfig;
use rtengine::engine::EngineMode;
use rtengine::engine::Engines;
use rtengine::thread::ThreadRef;

use self::common::FixedCpu;
use self::common::IdleHost;

#[test]
fn concurrent_timer_ticks() {
  loom::model(|| {
    let engines: Arc<Engines> = Arc::new(Engines::new(
      EngineConfig::new(),
      std::sync::Arc::new(FixedCpu::new(0)),
      std::sync::Arc::new(IdleHost),
      &[EngineMode::Execution],
    ));

    let _thread: ThreadRef = engines.current().threads().create();

    engines.current().enter();

    let tickers: Vec<_> = (0..2)
      .map(|_| {
        let engines: Arc<Engines> = Arc::clone(&engines);

        thread::spawn(move || {
          // SAFETY: Interrupt entry is simulated; nothing depends on real masking.
          let irq: IrqContext = unsafe { IrqContext::new() };
          engines.get(CoreId::new(0)).unwrap().timer_tick(&irq);
        })
      })
      .collect();

    for handle in tickers {
      handle.join().unwrap();
    }

    assert_eq!(engines.current().context().ticks(), 2, "no tick is lost");
  });
}
