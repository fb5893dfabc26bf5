//! Test utilities for refresh-kit integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Level;

pub use refresh_kit::{
    Edge, EdgeInsets, HostUpdate, Point, Rect, RefreshIndicator, RefreshView, Size, TriggerState, Viewport,
};

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        let level = level.parse::<Level>().unwrap_or(Level::INFO);
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_test_writer()
            .try_init();
    }
}

/// Standard viewport: 320x600 with exactly one screen of content
pub const VIEWPORT: Size = Size::new(320.0, 600.0);
/// Standard indicator: 24x24, footprint 40 at the leading edge, 56 at the trailing edge
pub const INDICATOR: Size = Size::new(24.0, 24.0);

// ============================================================================
// MockIndicator
// ============================================================================

/// A call received by a [`MockIndicator`]
#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorCall {
    Frame(Rect),
    Hidden(bool),
    Progress(f64),
    Start,
    End,
    Resume,
}

/// Shared view of the calls an indicator received after it was boxed
#[derive(Clone, Default)]
pub struct IndicatorLog(Arc<Mutex<Vec<IndicatorCall>>>);

impl IndicatorLog {
    pub fn calls(&self) -> Vec<IndicatorCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn starts(&self) -> usize {
        self.count(|call| *call == IndicatorCall::Start)
    }

    pub fn ends(&self) -> usize {
        self.count(|call| *call == IndicatorCall::End)
    }

    pub fn resumes(&self) -> usize {
        self.count(|call| *call == IndicatorCall::Resume)
    }

    pub fn progress_calls(&self) -> usize {
        self.count(|call| matches!(call, IndicatorCall::Progress(_)))
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|call| match call {
            IndicatorCall::Progress(progress) => Some(progress),
            _ => None,
        })
    }

    pub fn last_frame(&self) -> Option<Rect> {
        self.calls().into_iter().rev().find_map(|call| match call {
            IndicatorCall::Frame(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn is_hidden(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            IndicatorCall::Hidden(hidden) => Some(hidden),
            _ => None,
        })
    }

    fn count(&self, f: impl Fn(&IndicatorCall) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|call| f(call)).count()
    }

    fn push(&self, call: IndicatorCall) {
        self.0.lock().unwrap().push(call);
    }
}

/// Indicator double recording every capability call
pub struct MockIndicator {
    size: Size,
    log: IndicatorLog,
}

impl MockIndicator {
    pub fn new(size: Size) -> (Box<dyn RefreshIndicator>, IndicatorLog) {
        let log = IndicatorLog::default();
        let indicator = Box::new(Self { size, log: log.clone() });
        (indicator, log)
    }
}

impl RefreshIndicator for MockIndicator {
    fn size(&self) -> Size {
        self.size
    }

    fn set_frame(&mut self, frame: Rect) {
        self.log.push(IndicatorCall::Frame(frame));
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.log.push(IndicatorCall::Hidden(hidden));
    }

    fn set_progress(&mut self, progress: f64) {
        self.log.push(IndicatorCall::Progress(progress));
    }

    fn start_refreshing(&mut self) {
        self.log.push(IndicatorCall::Start);
    }

    fn end_refreshing(&mut self) {
        self.log.push(IndicatorCall::End);
    }

    fn resume(&mut self) {
        self.log.push(IndicatorCall::Resume);
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Counts trigger callback invocations
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn callback(&self) -> impl FnMut() + Send + 'static {
        let count = self.0.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A RefreshView plus the logs and counters of what it drove.
///
/// Simulates the host: every `scroll_to` is one offset sample, and host
/// updates accumulate until the test drains them with `updates()`.
pub struct Harness {
    pub view: RefreshView,
    pub leading: IndicatorLog,
    pub trailing: IndicatorLog,
    pub refreshes: Counter,
    pub pages: Counter,
}

impl Harness {
    /// Standard viewport with `content_height` of content, no indicators yet
    pub fn new(content_height: f64) -> Self {
        Self::with_viewport(Viewport::new(VIEWPORT).with_content_size(Size::new(VIEWPORT.width, content_height)))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        let refreshes = Counter::default();
        let pages = Counter::default();
        let mut view = RefreshView::new(viewport);
        view.set_trigger_callback(Edge::Leading, refreshes.callback());
        view.set_trigger_callback(Edge::Trailing, pages.callback());
        Self {
            view,
            leading: IndicatorLog::default(),
            trailing: IndicatorLog::default(),
            refreshes,
            pages,
        }
    }

    /// Attach a standard mock indicator to the leading edge
    pub fn with_pull_to_refresh(mut self) -> Self {
        let (indicator, log) = MockIndicator::new(INDICATOR);
        self.view.set_indicator(Edge::Leading, indicator);
        self.leading = log;
        self
    }

    /// Attach a standard mock indicator to the trailing edge (armed on attach)
    pub fn with_pagination(mut self) -> Self {
        let (indicator, log) = MockIndicator::new(INDICATOR);
        self.view.set_indicator(Edge::Trailing, indicator);
        self.trailing = log;
        self
    }

    /// Discard updates produced while setting up
    pub fn settle(mut self) -> Self {
        self.view.take_updates();
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.view.set_content_offset(Point::new(0.0, y));
    }

    pub fn updates(&mut self) -> Vec<HostUpdate> {
        self.view.take_updates()
    }

    pub fn inset(&self) -> EdgeInsets {
        self.view.viewport().content_inset()
    }

    pub fn state(&self, edge: Edge) -> TriggerState {
        use refresh_kit::ankurah_signals::Get;
        self.view.state(edge).get()
    }
}

/// Approximate float comparison for derived geometry
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
