mod common;

use common::*;
use refresh_kit::geometry::*;

#[test]
fn test_trigger_offset_includes_baseline_and_safe_area() {
    assert_close(trigger_offset(0.0, 0.0, 0.0), 0.0);
    assert_close(trigger_offset(-120.0, 0.0, 0.0), -120.0);
    assert_close(trigger_offset(-164.0, 44.0, 0.0), -120.0);
    assert_close(trigger_offset(-140.0, 0.0, 20.0), -120.0);
}

#[test]
fn test_pull_progress() {
    assert_close(pull_progress(-50.0, 600.0, 6.0), 0.5);
    assert_close(pull_progress(-100.0, 600.0, 6.0), 1.0);
    assert_close(pull_progress(-150.0, 600.0, 6.0), 1.5);
    // Scrolled into content
    assert_close(pull_progress(30.0, 600.0, 6.0), 0.0);
    // Not laid out yet, or nonsense divisors
    assert_close(pull_progress(-50.0, 0.0, 6.0), 0.0);
    assert_close(pull_progress(-50.0, 600.0, 0.0), 0.0);
    assert_close(pull_progress(-50.0, 600.0, -6.0), 0.0);
}

#[test]
fn test_footprint_and_resting_offset() {
    assert_close(footprint(24.0, 8.0), 40.0);
    assert_close(footprint(24.0, 16.0), 56.0);
    assert_close(resting_offset(0.0, 0.0, 40.0), -40.0);
    assert_close(resting_offset(20.0, 64.0, 40.0), -84.0);
}

#[test]
fn test_leading_indicator_origin() {
    let indicator = Size::new(24.0, 24.0);
    assert_eq!(
        leading_indicator_origin(320.0, indicator, -120.0, 0.0, 0.0),
        Point::new(148.0, -72.0)
    );
    assert_eq!(
        leading_indicator_origin(320.0, indicator, -100.0, 0.0, 64.0),
        Point::new(148.0, -30.0)
    );
    assert_eq!(
        leading_indicator_origin(375.0, Size::new(22.0, 22.0), 0.0, 0.0, 0.0),
        Point::new(176.5, -11.0)
    );
}

#[test]
fn test_trailing_threshold() {
    assert_close(trailing_threshold(1000.0, 600.0, 0.0), 400.0);
    assert_close(trailing_threshold(1000.0, 600.0, 34.0), 366.0);
}

#[test]
fn test_crosses_trailing_edge() {
    let viewport = Size::new(320.0, 600.0);
    let content = Size::new(320.0, 1000.0);

    assert!(!crosses_trailing_edge(399.9, content, viewport, 0.0));
    assert!(crosses_trailing_edge(400.0, content, viewport, 0.0));
    assert!(crosses_trailing_edge(366.0, content, viewport, 34.0));

    // Short content: the threshold is negative but pagination is off
    assert!(!can_paginate(300.0, 600.0));
    assert!(!crosses_trailing_edge(0.0, Size::new(320.0, 300.0), viewport, 0.0));

    // Unlaid-out viewport
    assert!(!can_paginate(0.0, 0.0));
    assert!(!crosses_trailing_edge(0.0, Size::new(320.0, 0.0), Size::new(320.0, 0.0), 0.0));

    assert!(can_paginate(600.0, 600.0));
}

#[test]
fn test_trailing_indicator_origin() {
    assert_eq!(
        trailing_indicator_origin(320.0, Size::new(24.0, 24.0), 1000.0, 16.0),
        Point::new(148.0, 1016.0)
    );
}
