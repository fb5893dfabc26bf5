//! Trigger Geometry Module
//!
//! Pure functions for threshold and indicator placement calculations.

use crate::{Point, Size};

// ============================================================================
// Leading Edge
// ============================================================================

/// Scroll position adjusted by the safe-area delta and inset baseline.
///
/// Zero at rest; negative when the user pulls content down past its origin.
pub fn trigger_offset(offset_y: f64, adjusted_inset_delta: f64, baseline_inset: f64) -> f64 {
    offset_y + adjusted_inset_delta + baseline_inset
}

/// Pull progress: `max(0, -trigger_offset) / (viewport_height / divisor)`
pub fn pull_progress(trigger_offset: f64, viewport_height: f64, divisor: f64) -> f64 {
    let full_pull = viewport_height / divisor;
    if full_pull <= 0.0 || !full_pull.is_finite() {
        return 0.0;
    }
    (-trigger_offset).max(0.0) / full_pull
}

/// Inset an indicator occupies: its height plus a margin on either side
pub fn footprint(indicator_height: f64, margin: f64) -> f64 {
    indicator_height + margin * 2.0
}

/// Trigger offset at which a refreshing indicator stops following the gesture
pub fn resting_offset(baseline_inset: f64, static_inset: f64, footprint: f64) -> f64 {
    baseline_inset - static_inset - footprint
}

/// Origin of the pull indicator: centered horizontally, halfway into the revealed gap
pub fn leading_indicator_origin(
    viewport_width: f64,
    indicator: Size,
    offset_y: f64,
    adjusted_inset_delta: f64,
    static_inset: f64,
) -> Point {
    Point {
        x: (viewport_width - indicator.width) / 2.0,
        y: (offset_y + adjusted_inset_delta + static_inset - indicator.height) / 2.0,
    }
}

// ============================================================================
// Trailing Edge
// ============================================================================

/// Offset at which the bottom of the viewport reaches the end of content
pub fn trailing_threshold(content_height: f64, viewport_height: f64, safe_area_bottom: f64) -> f64 {
    content_height - viewport_height - safe_area_bottom
}

/// Pagination only makes sense once content fills a laid-out viewport
pub fn can_paginate(content_height: f64, viewport_height: f64) -> bool {
    viewport_height > 0.0 && content_height >= viewport_height
}

/// Check if pagination should trigger for an offset sample
pub fn crosses_trailing_edge(offset_y: f64, content: Size, viewport: Size, safe_area_bottom: f64) -> bool {
    offset_y >= trailing_threshold(content.height, viewport.height, safe_area_bottom)
        && can_paginate(content.height, viewport.height)
}

/// Origin of the pagination indicator: centered horizontally below the content
pub fn trailing_indicator_origin(viewport_width: f64, indicator: Size, content_height: f64, spacing: f64) -> Point {
    Point {
        x: (viewport_width - indicator.width) / 2.0,
        y: content_height + spacing,
    }
}
