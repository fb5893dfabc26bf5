//! Trailing-edge trigger (pagination)

use ankurah_signals::Mut;

use crate::geometry;
use crate::indicator::RefreshIndicator;
use crate::options::PaginationOptions;
use crate::viewport::{ObserverId, Viewport, ViewportEvent, ViewportProperty};
use crate::{Point, Rect, TriggerState};

/// Pagination state attached to a viewport's trailing edge.
///
/// Armed (`Pulling`) as soon as it is attached. Once triggered it re-arms when
/// the content height changes (the caller appended a page) or when the caller
/// ends refreshing explicitly. [`Pagination::disable`] turns it off until the
/// next [`Pagination::reload`].
pub struct Pagination {
    indicator: Box<dyn RefreshIndicator>,
    observer: ObserverId,
    options: PaginationOptions,
    /// Bottom inset restored when not refreshing
    baseline_inset: f64,
    static_inset: f64,
    /// Content height recorded when the trigger fired
    content_extent: f64,
    current: TriggerState,
    state: Mut<TriggerState>,
}

impl Pagination {
    pub(crate) fn attach(
        viewport: &mut Viewport,
        mut indicator: Box<dyn RefreshIndicator>,
        options: PaginationOptions,
        static_inset: f64,
        state: Mut<TriggerState>,
    ) -> Self {
        let observer = viewport.observe(&[
            ViewportProperty::ContentOffset,
            ViewportProperty::ContentInset,
            ViewportProperty::ContentSize,
        ]);
        indicator.resume();
        indicator.set_hidden(true);
        // Armed without applying state: attaching leaves the bottom inset alone
        state.set(TriggerState::Pulling);

        Self {
            indicator,
            observer,
            options,
            baseline_inset: viewport.content_inset().bottom,
            static_inset,
            content_extent: viewport.content_size().height,
            current: TriggerState::Pulling,
            state,
        }
    }

    /// Leave the viewport, restoring the inset if a page load was in flight
    pub(crate) fn detach(mut self, viewport: &mut Viewport) -> Box<dyn RefreshIndicator> {
        viewport.unobserve(self.observer);
        if self.current == TriggerState::Refreshing {
            self.write_bottom_inset(self.baseline_inset, viewport);
            self.indicator.end_refreshing();
            self.indicator.set_hidden(true);
        }
        self.indicator
    }

    // Accessors
    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    pub fn indicator(&self) -> &dyn RefreshIndicator {
        self.indicator.as_ref()
    }

    pub fn state(&self) -> TriggerState {
        self.current
    }

    pub fn is_refreshing(&self) -> bool {
        self.current == TriggerState::Refreshing
    }

    pub fn baseline_inset(&self) -> f64 {
        self.baseline_inset
    }

    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    pub(crate) fn set_static_inset(&mut self, value: f64) {
        self.static_inset = value;
    }

    /// Inset this machine adds on top of the baseline in the current state
    fn occupied_inset(&self) -> f64 {
        if self.is_refreshing() {
            self.static_inset + geometry::footprint(self.indicator.size().height, self.options.margin)
        } else {
            0.0
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Handle a viewport event; returns true when the pagination action should run
    pub(crate) fn handle(&mut self, event: &ViewportEvent, viewport: &mut Viewport) -> bool {
        match *event {
            ViewportEvent::ContentOffset { new, .. } => self.on_offset_changed(new, viewport),
            // Superseded by a later write whose own event is still queued
            ViewportEvent::ContentInset { new, .. } if new.bottom != viewport.content_inset().bottom => false,
            ViewportEvent::ContentInset { new, .. } => {
                self.on_inset_changed(new.bottom);
                false
            }
            ViewportEvent::ContentSize { new, .. } => {
                self.on_content_size_changed(new.height, viewport);
                false
            }
        }
    }

    fn on_offset_changed(&mut self, offset: Point, viewport: &mut Viewport) -> bool {
        if self.current != TriggerState::Pulling {
            return false;
        }
        let crossed = geometry::crosses_trailing_edge(
            offset.y,
            viewport.content_size(),
            viewport.bounds(),
            viewport.safe_area_insets().bottom,
        );
        if !crossed {
            return false;
        }

        self.content_extent = viewport.content_size().height;
        tracing::debug!(
            "pagination: offset={} crossed threshold, content_extent={}",
            offset.y,
            self.content_extent
        );
        self.transition(TriggerState::Refreshing, viewport);
        true
    }

    fn on_content_size_changed(&mut self, height: f64, viewport: &mut Viewport) {
        if !self.is_refreshing() || height == self.content_extent {
            return;
        }
        tracing::debug!("pagination: content extent {} -> {}", self.content_extent, height);
        self.content_extent = height;
        self.transition(TriggerState::Pulling, viewport);
    }

    fn on_inset_changed(&mut self, new_bottom: f64) {
        let occupied = self.occupied_inset();
        if new_bottom != self.baseline_inset + occupied {
            self.baseline_inset = new_bottom - occupied;
            tracing::debug!("pagination: baseline inset -> {}", self.baseline_inset);
        }
    }

    // ------------------------------------------------------------------------
    // Control
    // ------------------------------------------------------------------------

    pub(crate) fn disable(&mut self, viewport: &mut Viewport) {
        self.transition(TriggerState::Idle, viewport);
    }

    /// Arm the trigger unless it already is
    pub(crate) fn reload(&mut self, viewport: &mut Viewport) {
        if self.current == TriggerState::Pulling {
            return;
        }
        self.transition(TriggerState::Pulling, viewport);
    }

    /// Explicit "page loaded" completion, for callers whose append may not change the content size
    pub(crate) fn end_refreshing(&mut self, viewport: &mut Viewport) {
        if !self.is_refreshing() {
            return;
        }
        self.content_extent = viewport.content_size().height;
        self.transition(TriggerState::Pulling, viewport);
    }

    pub(crate) fn resume(&mut self) {
        self.indicator.resume();
    }

    fn transition(&mut self, state: TriggerState, viewport: &mut Viewport) {
        if self.current != state {
            tracing::debug!("pagination: {:?} -> {:?}", self.current, state);
        }
        self.current = state;
        self.state.set(state);
        self.apply_state(viewport);
    }

    fn apply_state(&mut self, viewport: &mut Viewport) {
        match self.current {
            TriggerState::Idle | TriggerState::Pulling => {
                self.indicator.end_refreshing();
                self.indicator.set_hidden(true);
                self.write_bottom_inset(self.baseline_inset, viewport);
            }
            TriggerState::Refreshing => {
                self.write_bottom_inset(self.baseline_inset + self.occupied_inset(), viewport);
                let size = self.indicator.size();
                let origin = geometry::trailing_indicator_origin(
                    viewport.bounds().width,
                    size,
                    viewport.content_size().height,
                    self.static_inset + self.options.margin,
                );
                self.indicator.set_frame(Rect::new(origin, size));
                self.indicator.start_refreshing();
                self.indicator.set_hidden(false);
            }
        }
    }

    fn write_bottom_inset(&self, bottom: f64, viewport: &mut Viewport) {
        let mut inset = viewport.content_inset();
        inset.bottom = bottom;
        viewport.set_content_inset(inset);
    }
}
