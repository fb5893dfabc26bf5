//! Headless viewport model
//!
//! A `Viewport` mirrors the geometry of the host's scroll view. Property
//! changes are queued as [`ViewportEvent`]s for the observers registered
//! through [`Viewport::observe`]; writes made on behalf of the host's real
//! view are logged as [`HostUpdate`]s.

use std::collections::VecDeque;
use std::time::Duration;

use crate::{EdgeInsets, Point, Size};

/// Observable viewport properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportProperty {
    ContentOffset,
    ContentInset,
    ContentSize,
}

/// A change to an observed property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    ContentOffset { old: Point, new: Point },
    ContentInset { old: EdgeInsets, new: EdgeInsets },
    ContentSize { old: Size, new: Size },
}

impl ViewportEvent {
    pub fn property(&self) -> ViewportProperty {
        match self {
            ViewportEvent::ContentOffset { .. } => ViewportProperty::ContentOffset,
            ViewportEvent::ContentInset { .. } => ViewportProperty::ContentInset,
            ViewportEvent::ContentSize { .. } => ViewportProperty::ContentSize,
        }
    }
}

/// A write the host must apply to its scroll view
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostUpdate {
    /// Set the content offset without animation (also stops any running deceleration)
    ContentOffset(Point),
    /// Set the content inset, animated over `animation` when present
    ContentInset { inset: EdgeInsets, animation: Option<Duration> },
    AlwaysBounceVertical(bool),
}

/// Registration handle returned by [`Viewport::observe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Clone, Debug)]
struct Observer {
    id: ObserverId,
    properties: Vec<ViewportProperty>,
}

#[derive(Clone, Debug, Default)]
pub struct Viewport {
    content_offset: Point,
    content_inset: EdgeInsets,
    safe_area_insets: EdgeInsets,
    content_size: Size,
    bounds: Size,
    always_bounce_vertical: bool,
    observers: Vec<Observer>,
    next_observer: u64,
    pending: VecDeque<ViewportEvent>,
    updates: Vec<HostUpdate>,
}

impl Viewport {
    /// Create a viewport of the given visible size
    pub fn new(bounds: Size) -> Self {
        Self { bounds, ..Self::default() }
    }

    pub fn with_content_size(mut self, content_size: Size) -> Self {
        self.content_size = content_size;
        self
    }

    pub fn with_content_inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self
    }

    pub fn with_safe_area_insets(mut self, insets: EdgeInsets) -> Self {
        self.safe_area_insets = insets;
        self
    }

    // Accessors
    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn content_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    pub fn safe_area_insets(&self) -> EdgeInsets {
        self.safe_area_insets
    }

    /// Content inset plus the safe area, as the host lays content out
    pub fn adjusted_content_inset(&self) -> EdgeInsets {
        self.content_inset + self.safe_area_insets
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn always_bounce_vertical(&self) -> bool {
        self.always_bounce_vertical
    }

    // ------------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------------

    /// Register interest in a set of properties
    pub fn observe(&mut self, properties: &[ViewportProperty]) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer { id, properties: properties.to_vec() });
        id
    }

    /// Remove a registration; unknown ids are ignored
    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.retain(|observer| observer.id != id);
    }

    /// Observers registered for `property`, in registration order
    pub fn observers_of(&self, property: ViewportProperty) -> Vec<ObserverId> {
        self.observers
            .iter()
            .filter(|observer| observer.properties.contains(&property))
            .map(|observer| observer.id)
            .collect()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn next_event(&mut self) -> Option<ViewportEvent> {
        self.pending.pop_front()
    }

    pub(crate) fn clear_events(&mut self) {
        self.pending.clear();
    }

    pub fn take_updates(&mut self) -> Vec<HostUpdate> {
        std::mem::take(&mut self.updates)
    }

    // ------------------------------------------------------------------------
    // Host samples (always delivered, even when unchanged)
    // ------------------------------------------------------------------------

    pub(crate) fn sync_content_offset(&mut self, offset: Point) {
        let old = std::mem::replace(&mut self.content_offset, offset);
        self.pending.push_back(ViewportEvent::ContentOffset { old, new: offset });
    }

    pub(crate) fn sync_content_inset(&mut self, inset: EdgeInsets) {
        let old = std::mem::replace(&mut self.content_inset, inset);
        self.pending.push_back(ViewportEvent::ContentInset { old, new: inset });
    }

    pub(crate) fn sync_content_size(&mut self, size: Size) {
        let old = std::mem::replace(&mut self.content_size, size);
        self.pending.push_back(ViewportEvent::ContentSize { old, new: size });
    }

    pub(crate) fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub(crate) fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.safe_area_insets = insets;
    }

    // ------------------------------------------------------------------------
    // Component writes (forwarded to the host, observed only on change)
    // ------------------------------------------------------------------------

    /// Pin the content offset. The host update is always emitted so the host
    /// stops any running deceleration, but observers only hear about real changes.
    pub fn set_content_offset(&mut self, offset: Point) {
        self.updates.push(HostUpdate::ContentOffset(offset));
        if offset != self.content_offset {
            let old = std::mem::replace(&mut self.content_offset, offset);
            self.pending.push_back(ViewportEvent::ContentOffset { old, new: offset });
        }
    }

    pub fn set_content_inset(&mut self, inset: EdgeInsets) {
        self.write_inset(inset, None);
    }

    pub fn set_content_inset_animated(&mut self, inset: EdgeInsets, duration: Duration) {
        self.write_inset(inset, Some(duration));
    }

    fn write_inset(&mut self, inset: EdgeInsets, animation: Option<Duration>) {
        if inset == self.content_inset {
            return;
        }
        let old = std::mem::replace(&mut self.content_inset, inset);
        self.updates.push(HostUpdate::ContentInset { inset, animation });
        self.pending.push_back(ViewportEvent::ContentInset { old, new: inset });
    }

    pub fn set_always_bounce_vertical(&mut self, enabled: bool) {
        if self.always_bounce_vertical == enabled {
            return;
        }
        self.always_bounce_vertical = enabled;
        self.updates.push(HostUpdate::AlwaysBounceVertical(enabled));
    }
}
