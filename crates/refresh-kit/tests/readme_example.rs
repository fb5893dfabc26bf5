//! Example code for README documentation
//!
//! This file provides compile-checked examples for the README.
//! The function is not actually run as a test but is validated by `cargo test --workspace`.

use ankurah_signals::Get;
use refresh_kit::{Edge, EdgeInsets, HostUpdate, Point, RefreshControl, RefreshView, Size, TriggerState, Viewport};

/// Example: Driving pull-to-refresh and pagination from a host scroll view
#[allow(dead_code)]
fn refresh_view_example() -> Result<(), Box<dyn std::error::Error>> {
    // Mirror the host's scroll view geometry
    let viewport = Viewport::new(Size::new(390.0, 844.0))
        .with_content_size(Size::new(390.0, 2400.0))
        .with_safe_area_insets(EdgeInsets::new(47.0, 0.0, 34.0, 0.0));
    let mut view = RefreshView::new(viewport);

    // Ring indicators on both edges
    view.set_indicator(Edge::Leading, Box::new(RefreshControl::default()));
    view.set_indicator(Edge::Trailing, Box::new(RefreshControl::default()));

    // Start loading when an edge triggers; completion comes back via end_refreshing
    view.set_trigger_callback(Edge::Leading, || { /* reload the first page */ });
    view.set_trigger_callback(Edge::Trailing, || { /* fetch the next page */ });

    // Forward every scroll sample from the host
    view.set_content_offset(Point::new(0.0, -200.0));

    // Apply the writes the machines made
    for update in view.take_updates() {
        match update {
            HostUpdate::ContentOffset(_offset) => { /* scroll_view.set_content_offset(...) */ }
            HostUpdate::ContentInset { inset: _, animation: _ } => { /* scroll_view.set_content_inset(...) */ }
            HostUpdate::AlwaysBounceVertical(_enabled) => { /* scroll_view.set_always_bounce_vertical(...) */ }
        }
    }

    // Observe trigger state
    if view.state(Edge::Leading).get() == TriggerState::Refreshing {
        // ...the refresh finished
        view.end_refreshing(Edge::Leading);
    }

    Ok(())
}

// Bindings for a host platform; the platform features decide what it expands to
#[cfg(not(any(feature = "uniffi", feature = "wasm")))]
mod bindings {
    refresh_kit::generate_refresh_bindings!(Feed);
}
