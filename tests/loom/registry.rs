#![cfg(loom)]

#[path = "../common/mod.rs"]
mod common;

use loom::sync::Arc;
use loom::thread;
use rtengine::arch::CoreId;
use rtengine::engine::ThreadRegistry;
use rtengine::thread::ThreadRef;

use self::common::FixedCpu;

#[test]
fn concurrent_create_and_drain() {
  loom::model(|| {
    let registry: Arc<ThreadRegistry> = Arc::new(ThreadRegistry::new(
      CoreId::new(1),
      std::sync::Arc::new(FixedCpu::new(1)),
      1,
    ));

    let creators: Vec<_> = (0..2)
      .map(|_| {
        let registry: Arc<ThreadRegistry> = Arc::clone(&registry);
        thread::spawn(move || registry.create())
      })
      .collect();

    let mut taken: Vec<ThreadRef> = registry.take_new_threads();

    let created: Vec<ThreadRef> = creators
      .into_iter()
      .map(|handle| handle.join().unwrap())
      .collect();

    taken.extend(registry.take_new_threads());

    assert_eq!(taken.len(), 2, "every thread is drained");
    assert!(!created[0].ptr_eq(&created[1]), "handles are distinct");

    for thread in created.iter() {
      let count: usize = taken.iter().filter(|other| other.ptr_eq(thread)).count();
      assert_eq!(count, 1, "each thread is drained exactly once");
    }

    assert_eq!(registry.len(), 2);
  });
}
