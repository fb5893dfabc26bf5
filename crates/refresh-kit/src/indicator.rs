//! Indicator capability
//!
//! Trigger machines never draw. They drive whatever implements
//! [`RefreshIndicator`]: a native view behind bindings, the headless
//! [`RefreshControl`](crate::RefreshControl), or a test double.

use crate::{Rect, Size};

pub trait RefreshIndicator: Send {
    /// Size of the indicator view; its height sizes the inset footprint
    fn size(&self) -> Size;

    /// Place the indicator in content coordinates
    fn set_frame(&mut self, frame: Rect);

    fn set_hidden(&mut self, hidden: bool);

    /// Report pull progress (1.0 = threshold). Called on every sample while
    /// pulling, so it must be cheap and idempotent. Values may exceed 1.0.
    fn set_progress(&mut self, progress: f64);

    /// Begin the indeterminate animation
    fn start_refreshing(&mut self);

    /// Stop animating and hide
    fn end_refreshing(&mut self);

    /// The host became visible again; restart any suspended animation
    fn resume(&mut self);
}

impl<T: RefreshIndicator + ?Sized> RefreshIndicator for Box<T> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn set_frame(&mut self, frame: Rect) {
        (**self).set_frame(frame)
    }

    fn set_hidden(&mut self, hidden: bool) {
        (**self).set_hidden(hidden)
    }

    fn set_progress(&mut self, progress: f64) {
        (**self).set_progress(progress)
    }

    fn start_refreshing(&mut self) {
        (**self).start_refreshing()
    }

    fn end_refreshing(&mut self) {
        (**self).end_refreshing()
    }

    fn resume(&mut self) {
        (**self).resume()
    }
}
