//! Deferred trigger delivery, as the generated bindings use it

mod common;

use std::cell::RefCell;

use common::*;
use refresh_kit::PendingTriggers;

/// Wrapper shaped like the generated WASM bindings: the view sits behind a
/// `RefCell` and triggers are replayed once the borrow is released.
struct CellHost {
    view: RefCell<RefreshView>,
    pending: PendingTriggers,
    on_trigger: Box<dyn Fn(&CellHost, Edge)>,
}

impl CellHost {
    fn new(content_height: f64, on_trigger: impl Fn(&CellHost, Edge) + 'static) -> Self {
        let viewport = Viewport::new(VIEWPORT).with_content_size(Size::new(VIEWPORT.width, content_height));
        let pending = PendingTriggers::new();
        let mut view = RefreshView::new(viewport);
        view.set_indicator(Edge::Leading, MockIndicator::new(INDICATOR).0);
        view.set_indicator(Edge::Trailing, MockIndicator::new(INDICATOR).0);
        view.set_trigger_callback(Edge::Leading, pending.recorder(Edge::Leading));
        view.set_trigger_callback(Edge::Trailing, pending.recorder(Edge::Trailing));
        Self {
            view: RefCell::new(view),
            pending,
            on_trigger: Box::new(on_trigger),
        }
    }

    fn with_view<R>(&self, f: impl FnOnce(&mut RefreshView) -> R) -> R {
        let result = f(&mut self.view.borrow_mut());
        for edge in self.pending.take() {
            (self.on_trigger)(self, edge);
        }
        result
    }

    fn scroll_to(&self, y: f64) {
        self.with_view(|view| view.set_content_offset(Point::new(0.0, y)));
    }
}

#[test]
fn test_recorder_defers_until_taken() {
    let pending = PendingTriggers::new();
    let mut h = Harness::new(600.0).with_pull_to_refresh().settle();
    h.view.set_trigger_callback(Edge::Leading, pending.recorder(Edge::Leading));

    h.scroll_to(-60.0);
    assert!(pending.is_empty());

    h.scroll_to(-120.0);
    assert!(h.view.is_refreshing(Edge::Leading));
    assert_eq!(pending.take(), vec![Edge::Leading]);
    assert!(pending.is_empty());

    // Staying past the threshold records nothing new
    h.scroll_to(-150.0);
    assert!(pending.take().is_empty());
    assert_eq!(h.refreshes.get(), 0);
}

/// A trigger handler that completes immediately (cached data) re-enters the view.
#[test]
fn test_synchronous_completion_from_trigger() {
    let host = CellHost::new(1000.0, |host, edge| {
        assert!(host.view.borrow().is_refreshing(edge));
        host.with_view(|view| view.end_refreshing(edge));
    });

    host.scroll_to(-120.0);
    assert!(!host.view.borrow().is_refreshing(Edge::Leading));
    assert_eq!(host.view.borrow().viewport().content_inset().top, 0.0);

    host.scroll_to(0.0);
    host.scroll_to(400.0);
    let view = host.view.borrow();
    assert!(!view.is_refreshing(Edge::Trailing));
    assert_eq!(view.viewport().content_inset().bottom, 0.0);
}

#[test]
fn test_triggers_replay_in_order() {
    let seen = std::rc::Rc::new(RefCell::new(Vec::new()));
    let recorded = seen.clone();
    let host = CellHost::new(600.0, move |_, edge| recorded.borrow_mut().push(edge));

    host.scroll_to(-120.0);
    // Content of exactly one screen: the threshold is 0
    host.scroll_to(0.0);
    assert_eq!(*seen.borrow(), vec![Edge::Leading, Edge::Trailing]);
}
