//! Refresh Kit - headless pull-to-refresh and pagination for scroll viewports

pub mod geometry;
pub mod indicator;
pub mod options;
pub mod pagination;
pub mod pull_to_refresh;
pub mod spinner;
pub mod viewport;

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ankurah_signals::{Mut, Peek, Read};

use crate::pagination::Pagination;
use crate::pull_to_refresh::PullToRefresh;

// Re-export key types
pub use ankurah_signals;
pub use indicator::RefreshIndicator;
pub use options::{OptionsError, PaginationOptions, PullToRefreshOptions, RefreshOptions};
pub use spinner::{ControlSize, Haptics, RefreshControl};
pub use viewport::{HostUpdate, ObserverId, Viewport, ViewportEvent, ViewportProperty};

// ============================================================================
// Core Types
// ============================================================================

/// A position in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Frame of an indicator view, in content coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }
}

/// Padding reserved on each edge of the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    /// Insets with only the vertical edges set
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self { top, left: 0.0, bottom, right: 0.0 }
    }
}

impl std::ops::Add for EdgeInsets {
    type Output = EdgeInsets;

    fn add(self, rhs: EdgeInsets) -> EdgeInsets {
        EdgeInsets {
            top: self.top + rhs.top,
            left: self.left + rhs.left,
            bottom: self.bottom + rhs.bottom,
            right: self.right + rhs.right,
        }
    }
}

/// Edge of the scroll axis a trigger is attached to.
///
/// - `Leading`: start of content, where a pull gesture requests a refresh
/// - `Trailing`: end of content, where scrolling near the end requests the next page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Leading,
    Trailing,
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" | "top" => Ok(Edge::Leading),
            "trailing" | "bottom" => Ok(Edge::Trailing),
            other => Err(format!("Unknown edge: {:?}", other)),
        }
    }
}

/// Trigger state of one edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerState {
    /// Inactive (pagination: disabled until reloaded)
    #[default]
    Idle,
    /// Armed: eligible to fire on the next threshold crossing
    Pulling,
    /// Callback fired, waiting for the caller to finish
    Refreshing,
}

type TriggerAction = Box<dyn FnMut() + Send + 'static>;

/// Upper bound on events drained per input, breaks write/observe feedback loops
const MAX_EVENTS_PER_FLUSH: usize = 64;

// ============================================================================
// RefreshView
// ============================================================================

/// Pull-to-refresh and pagination attached to one viewport.
///
/// The host owns a `RefreshView` next to its native scroll view. It reports
/// every offset, inset and size change through the `set_*` methods, then
/// applies whatever [`RefreshView::take_updates`] returns to the real view.
pub struct RefreshView {
    viewport: Viewport,
    options: RefreshOptions,
    pull_to_refresh: Option<PullToRefresh>,
    pagination: Option<Pagination>,
    refresh_action: Option<TriggerAction>,
    pagination_action: Option<TriggerAction>,
    leading_static_inset: f64,
    trailing_static_inset: f64,
    leading_state: Mut<TriggerState>,
    trailing_state: Mut<TriggerState>,
    progress: Mut<f64>,
}

impl RefreshView {
    /// Create a refresh view with default options
    pub fn new(viewport: Viewport) -> Self {
        Self::build(viewport, RefreshOptions::default())
    }

    /// Create a refresh view with custom options
    pub fn with_options(viewport: Viewport, options: RefreshOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::build(viewport, options))
    }

    fn build(viewport: Viewport, options: RefreshOptions) -> Self {
        Self {
            viewport,
            options,
            pull_to_refresh: None,
            pagination: None,
            refresh_action: None,
            pagination_action: None,
            leading_static_inset: 0.0,
            trailing_static_inset: 0.0,
            leading_state: Mut::new(TriggerState::Idle),
            trailing_state: Mut::new(TriggerState::Idle),
            progress: Mut::new(0.0),
        }
    }

    // Accessors
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }

    pub fn is_refreshing(&self, edge: Edge) -> bool {
        match edge {
            Edge::Leading => self.pull_to_refresh.as_ref().is_some_and(PullToRefresh::is_refreshing),
            Edge::Trailing => self.pagination.as_ref().is_some_and(Pagination::is_refreshing),
        }
    }

    /// Trigger state signal for an edge (reads `Idle` while no indicator is attached)
    pub fn state(&self, edge: Edge) -> Read<TriggerState> {
        match edge {
            Edge::Leading => self.leading_state.read(),
            Edge::Trailing => self.trailing_state.read(),
        }
    }

    /// Pull progress signal of the leading edge (1.0 = threshold reached)
    pub fn progress(&self) -> Read<f64> {
        self.progress.read()
    }

    pub fn indicator(&self, edge: Edge) -> Option<&dyn RefreshIndicator> {
        match edge {
            Edge::Leading => self.pull_to_refresh.as_ref().map(PullToRefresh::indicator),
            Edge::Trailing => self.pagination.as_ref().map(Pagination::indicator),
        }
    }

    /// Drain the writes the host must apply to its scroll view
    pub fn take_updates(&mut self) -> Vec<HostUpdate> {
        self.viewport.take_updates()
    }

    // ------------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------------

    /// Attach an indicator to an edge, replacing (and resetting) any previous one
    pub fn set_indicator(&mut self, edge: Edge, indicator: Box<dyn RefreshIndicator>) {
        self.remove_indicator(edge);
        match edge {
            Edge::Leading => {
                let machine = PullToRefresh::attach(
                    &mut self.viewport,
                    indicator,
                    self.options.leading.clone(),
                    self.leading_static_inset,
                    self.leading_state.clone(),
                    self.progress.clone(),
                );
                self.pull_to_refresh = Some(machine);
            }
            Edge::Trailing => {
                let machine = Pagination::attach(
                    &mut self.viewport,
                    indicator,
                    self.options.trailing.clone(),
                    self.trailing_static_inset,
                    self.trailing_state.clone(),
                );
                self.pagination = Some(machine);
            }
        }
        tracing::debug!("set_indicator({:?})", edge);
        self.flush();
    }

    /// Detach the indicator of an edge, returning it to the caller
    pub fn remove_indicator(&mut self, edge: Edge) -> Option<Box<dyn RefreshIndicator>> {
        let indicator = match edge {
            Edge::Leading => self
                .pull_to_refresh
                .take()
                .map(|machine| machine.detach(&mut self.viewport)),
            Edge::Trailing => self
                .pagination
                .take()
                .map(|machine| machine.detach(&mut self.viewport)),
        };
        if indicator.is_some() {
            match edge {
                Edge::Leading => {
                    self.leading_state.set(TriggerState::Idle);
                    self.progress.set(0.0);
                }
                Edge::Trailing => self.trailing_state.set(TriggerState::Idle),
            }
            tracing::debug!("remove_indicator({:?})", edge);
        }
        indicator
    }

    /// Set the closure invoked when an edge triggers.
    ///
    /// The closure only starts the caller's work; completion is reported back
    /// through [`RefreshView::end_refreshing`].
    pub fn set_trigger_callback(&mut self, edge: Edge, callback: impl FnMut() + Send + 'static) {
        let action: TriggerAction = Box::new(callback);
        match edge {
            Edge::Leading => self.refresh_action = Some(action),
            Edge::Trailing => self.pagination_action = Some(action),
        }
    }

    pub fn set_static_inset(&mut self, edge: Edge, value: f64) {
        match edge {
            Edge::Leading => {
                self.leading_static_inset = value;
                if let Some(machine) = self.pull_to_refresh.as_mut() {
                    machine.set_static_inset(value);
                }
            }
            Edge::Trailing => {
                self.trailing_static_inset = value;
                if let Some(machine) = self.pagination.as_mut() {
                    machine.set_static_inset(value);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------------

    /// Report that the caller's refresh (or page load) has finished
    pub fn end_refreshing(&mut self, edge: Edge) {
        match edge {
            Edge::Leading => {
                let Some(pull) = self.pull_to_refresh.as_mut() else {
                    return;
                };
                if !pull.is_refreshing() {
                    return;
                }
                // A fresh first page invalidates whatever pagination was waiting on
                if let Some(pagination) = self.pagination.as_mut() {
                    pagination.reload(&mut self.viewport);
                }
                pull.end_refreshing(&mut self.viewport);
            }
            Edge::Trailing => {
                if let Some(pagination) = self.pagination.as_mut() {
                    pagination.end_refreshing(&mut self.viewport);
                }
            }
        }
        self.flush();
    }

    pub fn disable_pagination(&mut self) {
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.disable(&mut self.viewport);
        }
        self.flush();
    }

    pub fn reload_pagination(&mut self) {
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.reload(&mut self.viewport);
        }
        self.flush();
    }

    // ------------------------------------------------------------------------
    // Host inputs
    // ------------------------------------------------------------------------

    /// Report a new content offset sample
    pub fn set_content_offset(&mut self, offset: Point) {
        self.viewport.sync_content_offset(offset);
        self.flush();
    }

    pub fn set_content_inset(&mut self, inset: EdgeInsets) {
        self.viewport.sync_content_inset(inset);
        self.flush();
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.viewport.sync_content_size(size);
        self.flush();
    }

    /// Report a new viewport size (layout pass)
    pub fn set_bounds(&mut self, bounds: Size) {
        self.viewport.set_bounds(bounds);
    }

    pub fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.viewport.set_safe_area_insets(insets);
    }

    /// The host became visible again (app foregrounded)
    pub fn resume(&mut self) {
        if let Some(pull) = self.pull_to_refresh.as_mut() {
            pull.resume();
        }
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.resume();
        }
    }

    /// Deliver queued viewport events to their observers
    fn flush(&mut self) {
        let mut delivered = 0;
        while let Some(event) = self.viewport.next_event() {
            delivered += 1;
            if delivered > MAX_EVENTS_PER_FLUSH {
                tracing::warn!(
                    "flush: more than {} viewport events in one pass, dropping the rest",
                    MAX_EVENTS_PER_FLUSH
                );
                self.viewport.clear_events();
                break;
            }

            for observer in self.viewport.observers_of(event.property()) {
                if let Some(pull) = self.pull_to_refresh.as_mut().filter(|m| m.observer() == observer) {
                    if pull.handle(&event, &mut self.viewport) {
                        tracing::debug!("pull to refresh triggered");
                        if let Some(action) = self.refresh_action.as_mut() {
                            action();
                        }
                    }
                } else if let Some(pagination) = self.pagination.as_mut().filter(|m| m.observer() == observer) {
                    if pagination.handle(&event, &mut self.viewport) {
                        tracing::debug!("pagination triggered");
                        if let Some(action) = self.pagination_action.as_mut() {
                            action();
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for RefreshView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshView")
            .field("viewport", &self.viewport)
            .field("leading", &self.leading_state.peek())
            .field("trailing", &self.trailing_state.peek())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// PendingTriggers
// ============================================================================

/// Triggers recorded during a call into a `RefreshView`, replayed afterwards.
///
/// Register [`PendingTriggers::recorder`] as an edge's trigger callback, then
/// [`PendingTriggers::take`] once the view is no longer borrowed. The replayed
/// callbacks are free to call back into the view, including a synchronous
/// `end_refreshing`. The generated bindings work this way.
#[derive(Clone, Debug, Default)]
pub struct PendingTriggers(Arc<Mutex<Vec<Edge>>>);

impl PendingTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger callback that records `edge` instead of acting on it
    pub fn recorder(&self, edge: Edge) -> impl FnMut() + Send + 'static {
        let pending = self.0.clone();
        move || {
            pending.lock().unwrap_or_else(PoisonError::into_inner).push(edge);
        }
    }

    /// Drain the recorded edges, oldest first
    pub fn take(&self) -> Vec<Edge> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Edge>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse an edge name as used by the generated bindings
pub fn parse_edge(s: &str) -> Result<Edge, String> {
    s.parse()
}

/// Dependencies referenced by code the bindings macro generates
#[cfg(feature = "wasm")]
pub mod derive_deps {
    pub use js_sys;
    pub use send_wrapper;
}

pub use refresh_kit_derive::generate_refresh_bindings;
