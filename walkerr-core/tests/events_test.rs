//! Tests for the walkerr event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use walkerr_core::events::*;

/// A test handler that counts events.
#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    direct_errors: AtomicUsize,
    unresolved: AtomicUsize,
}

impl WalkerrEventHandler for CountingHandler {
    fn on_unit_started(&self, _event: &UnitStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_direct_error(&self, _event: &DirectErrorEvent) {
        self.direct_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn on_call_unresolved(&self, event: &CallUnresolvedEvent) {
        if event.reported {
            self.unresolved.fetch_add(1, Ordering::Relaxed);
        }
    }
}

struct PanickingHandler;

impl WalkerrEventHandler for PanickingHandler {
    fn on_unit_started(&self, _event: &UnitStartedEvent) {
        panic!("handler failure");
    }
}

fn started(unit: &str) -> UnitStartedEvent {
    UnitStartedEvent { unit: unit.to_string() }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl WalkerrEventHandler for NoopHandler {}

    let dispatcher = EventDispatcher::with_handler(Arc::new(NoopHandler));
    dispatcher.emit_unit_started(&started("a.go"));
    dispatcher.emit_call_joined(&CallJoinedEvent {
        function: "p.f".into(),
        callee: "p.g".into(),
        errors: 1,
    });
    assert_eq!(dispatcher.handler_count(), 1);
}

#[test]
fn test_empty_dispatcher_is_inert() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_unit_started(&started("a.go"));
}

#[test]
fn test_every_handler_receives_events() {
    let first = Arc::new(CountingHandler::default());
    let second = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(first.clone());
    dispatcher.register(second.clone());

    dispatcher.emit_unit_started(&started("a.go"));
    dispatcher.emit_direct_error(&DirectErrorEvent {
        function: "d.afunc".into(),
        error: "d.AError".into(),
        line: 9,
    });
    dispatcher.emit_call_unresolved(&CallUnresolvedEvent {
        function: "e.bfunc".into(),
        callee: "sube.AFunc".into(),
        reported: true,
    });
    dispatcher.emit_call_unresolved(&CallUnresolvedEvent {
        function: "e.bfunc".into(),
        callee: "sube.AFunc".into(),
        reported: false,
    });

    for handler in [&first, &second] {
        assert_eq!(handler.started.load(Ordering::Relaxed), 1);
        assert_eq!(handler.direct_errors.load(Ordering::Relaxed), 1);
        assert_eq!(handler.unresolved.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_unit_started(&started("a.go"));
    assert_eq!(counter.started.load(Ordering::Relaxed), 1);
}

#[test]
fn test_cloned_dispatcher_shares_handlers() {
    let counter = Arc::new(CountingHandler::default());
    let dispatcher = EventDispatcher::with_handler(counter.clone());
    let clone = dispatcher.clone();

    dispatcher.emit_unit_started(&started("a.go"));
    clone.emit_unit_started(&started("b.go"));
    assert_eq!(counter.started.load(Ordering::Relaxed), 2);
}
