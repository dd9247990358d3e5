#![cfg(loom)]

#[path = "../common/mod.rs"]
mod common;

use loom::sync::Arc;
use loom::thread;
use rtengine::arch::IrqContext;
use rtengine::message::Message;
use rtengine::message::MessageKind;
use rtengine::thread::Mailbox;

use self::common::FixedCpu;

fn indices(messages: &[Message]) -> Vec<usize> {
  messages.iter().map(Message::receiver_index).collect()
}

#[test]
fn deferred_and_irq_push_race_drain() {
  loom::model(|| {
    let mailbox: Arc<Mailbox> = Arc::new(Mailbox::new(std::sync::Arc::new(FixedCpu::new(0)), 2));

    let deferred = {
      let mailbox: Arc<Mailbox> = Arc::clone(&mailbox);

      thread::spawn(move || {
        mailbox.push_message(Message::notify(MessageKind::Evaluate, 0));
      })
    };

    let interrupt = {
      let mailbox: Arc<Mailbox> = Arc::clone(&mailbox);

      thread::spawn(move || {
        // SAFETY: Interrupt entry is simulated; nothing depends on real masking.
        let irq: IrqContext = unsafe { IrqContext::new() };
        mailbox.push_message_irq(&irq, Message::notify(MessageKind::IrqRaise, 1));
      })
    };

    let mut received: Vec<usize> = indices(&mailbox.take_messages());

    deferred.join().unwrap();
    interrupt.join().unwrap();

    received.extend(indices(&mailbox.take_messages()));
    received.sort_unstable();

    assert_eq!(received, vec![0, 1], "every message is drained exactly once");
    assert_eq!(mailbox.dropped(), 0);
    assert!(mailbox.is_empty());
  });
}

#[test]
fn deferred_pushes_keep_order() {
  loom::model(|| {
    let mailbox: Arc<Mailbox> = Arc::new(Mailbox::new(std::sync::Arc::new(FixedCpu::new(0)), 1));

    let producer = {
      let mailbox: Arc<Mailbox> = Arc::clone(&mailbox);

      thread::spawn(move || {
        mailbox.push_message(Message::notify(MessageKind::Evaluate, 0));
        mailbox.push_message(Message::notify(MessageKind::Evaluate, 1));
      })
    };

    let mut received: Vec<usize> = indices(&mailbox.take_messages());

    producer.join().unwrap();

    received.extend(indices(&mailbox.take_messages()));

    assert_eq!(received, vec![0, 1], "drains preserve push order");
  });
}
