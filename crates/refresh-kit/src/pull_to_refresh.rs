//! Leading-edge trigger (pull-to-refresh)

use ankurah_signals::{Mut, Peek};

use crate::geometry;
use crate::indicator::RefreshIndicator;
use crate::options::PullToRefreshOptions;
use crate::viewport::{ObserverId, Viewport, ViewportEvent, ViewportProperty};
use crate::{Point, Rect, TriggerState};

/// Pull-to-refresh state attached to a viewport's leading edge.
///
/// Progress is derived from the trigger offset on every sample. Reaching 1.0
/// fires once; the next trigger needs both [`PullToRefresh::end_refreshing`]
/// and the content settling back above the slop.
pub struct PullToRefresh {
    indicator: Box<dyn RefreshIndicator>,
    observer: ObserverId,
    options: PullToRefreshOptions,
    /// Top inset restored when not refreshing
    baseline_inset: f64,
    static_inset: f64,
    /// Safe-area contribution: adjusted inset minus raw inset
    adjusted_inset_delta: f64,
    refreshing: bool,
    /// The previous cycle has settled back; required to trigger again
    settled: bool,
    /// Top inset written by this machine whose change event is still pending
    own_inset_write: Option<f64>,
    state: Mut<TriggerState>,
    progress: Mut<f64>,
}

impl PullToRefresh {
    pub(crate) fn attach(
        viewport: &mut Viewport,
        mut indicator: Box<dyn RefreshIndicator>,
        options: PullToRefreshOptions,
        static_inset: f64,
        state: Mut<TriggerState>,
        progress: Mut<f64>,
    ) -> Self {
        let observer = viewport.observe(&[ViewportProperty::ContentOffset, ViewportProperty::ContentInset]);
        viewport.set_always_bounce_vertical(true);
        indicator.resume();
        state.set(TriggerState::Idle);
        progress.set(0.0);

        let mut machine = Self {
            indicator,
            observer,
            options,
            baseline_inset: viewport.content_inset().top,
            static_inset,
            adjusted_inset_delta: 0.0,
            refreshing: false,
            settled: true,
            own_inset_write: None,
            state,
            progress,
        };
        machine.update_adjusted_inset_delta(viewport);
        machine
    }

    /// Leave the viewport, restoring the inset if a refresh was in flight
    pub(crate) fn detach(mut self, viewport: &mut Viewport) -> Box<dyn RefreshIndicator> {
        viewport.unobserve(self.observer);
        if self.refreshing {
            let mut inset = viewport.content_inset();
            inset.top = self.baseline_inset;
            viewport.set_content_inset(inset);
            self.indicator.end_refreshing();
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

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn baseline_inset(&self) -> f64 {
        self.baseline_inset
    }

    pub fn state(&self) -> TriggerState {
        self.state.peek()
    }

    pub(crate) fn set_static_inset(&mut self, value: f64) {
        self.static_inset = value;
    }

    fn footprint(&self) -> f64 {
        geometry::footprint(self.indicator.size().height, self.options.margin)
    }

    fn set_state(&self, state: TriggerState) {
        if self.state.peek() != state {
            tracing::debug!("pull_to_refresh: {:?} -> {:?}", self.state.peek(), state);
            self.state.set(state);
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Handle a viewport event; returns true when the refresh action should run
    pub(crate) fn handle(&mut self, event: &ViewportEvent, viewport: &mut Viewport) -> bool {
        match *event {
            ViewportEvent::ContentOffset { new, .. } => self.on_offset_changed(new, viewport),
            ViewportEvent::ContentInset { old, new } => {
                if new.top != old.top && new.top == viewport.content_inset().top {
                    self.on_inset_changed(new.top, viewport);
                }
                false
            }
            ViewportEvent::ContentSize { .. } => false,
        }
    }

    fn on_offset_changed(&mut self, offset: Point, viewport: &mut Viewport) -> bool {
        self.update_adjusted_inset_delta(viewport);

        let trigger_offset = geometry::trigger_offset(offset.y, self.adjusted_inset_delta, self.baseline_inset);
        let mut triggered = false;

        if trigger_offset < -self.options.trigger_slop {
            let progress = geometry::pull_progress(
                trigger_offset,
                viewport.bounds().height,
                self.options.progress_divisor,
            );
            tracing::trace!("pull_to_refresh: trigger_offset={}, progress={}", trigger_offset, progress);
            self.indicator.set_progress(progress);
            self.progress.set(progress);

            if progress >= 1.0 && !self.refreshing && self.settled {
                self.refreshing = true;
                self.settled = false;
                self.set_state(TriggerState::Refreshing);
                self.indicator.start_refreshing();
                triggered = true;
            } else if !self.refreshing {
                self.set_state(TriggerState::Pulling);
            }

            let footprint = self.footprint();
            let resting_inset = self.static_inset + footprint;
            let resting_offset = geometry::resting_offset(self.baseline_inset, self.static_inset, footprint);
            if self.refreshing && trigger_offset >= resting_offset && viewport.content_inset().top != resting_inset {
                tracing::debug!("pull_to_refresh: resting at inset {}", resting_inset);
                viewport.set_content_offset(Point::new(viewport.content_offset().x, offset.y));
                let mut inset = viewport.content_inset();
                inset.top = resting_inset;
                self.own_inset_write = Some(resting_inset);
                viewport.set_content_inset(inset);
            }
        } else if !self.refreshing {
            if !self.settled {
                self.settled = true;
                self.indicator.end_refreshing();
            }
            self.progress.set(0.0);
            self.set_state(TriggerState::Idle);
        }

        self.update_frame(offset.y, viewport);
        triggered
    }

    fn on_inset_changed(&mut self, new_top: f64, viewport: &Viewport) {
        if self.own_inset_write == Some(new_top) {
            self.own_inset_write = None;
            return;
        }
        let occupied = if self.refreshing { self.footprint() } else { 0.0 };
        self.baseline_inset = new_top - occupied;
        tracing::debug!("pull_to_refresh: baseline inset -> {}", self.baseline_inset);
        self.update_adjusted_inset_delta(viewport);
    }

    // ------------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------------

    /// Stop refreshing and animate the inset back to the baseline
    pub(crate) fn end_refreshing(&mut self, viewport: &mut Viewport) {
        if !self.refreshing {
            return;
        }
        self.refreshing = false;
        self.set_state(TriggerState::Idle);

        let mut inset = viewport.content_inset();
        if inset.top != self.baseline_inset {
            inset.top = self.baseline_inset;
            self.own_inset_write = Some(self.baseline_inset);
            viewport.set_content_inset_animated(inset, self.options.restore_duration);
        }
    }

    pub(crate) fn resume(&mut self) {
        self.indicator.resume();
    }

    fn update_adjusted_inset_delta(&mut self, viewport: &Viewport) {
        self.adjusted_inset_delta = viewport.adjusted_content_inset().top - viewport.content_inset().top;
    }

    fn update_frame(&mut self, offset_y: f64, viewport: &Viewport) {
        let size = self.indicator.size();
        let origin = geometry::leading_indicator_origin(
            viewport.bounds().width,
            size,
            offset_y,
            self.adjusted_inset_delta,
            self.static_inset,
        );
        self.indicator.set_frame(Rect::new(origin, size));
    }
}
