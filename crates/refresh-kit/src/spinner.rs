//! Ring indicator
//!
//! `RefreshControl` is the headless model of a circular progress ring. While
//! pulling it describes a stroked arc whose end follows the progress; while
//! refreshing it describes two looping animation groups (rotation and scale)
//! that the host plays back on its layer.

use std::f64::consts::PI;
use std::time::Duration;

use crate::indicator::RefreshIndicator;
use crate::{Point, Rect, Size};

// ============================================================================
// Constants
// ============================================================================

const LINE_WIDTH: f64 = 3.0;
const START_ANGLE: f64 = -0.5 * PI;
const END_ANGLE: f64 = 1.5 * PI;

/// Progress at or below which the ring layer is hidden
const HIDDEN_PROGRESS: f64 = 0.1;

const SCALE_UPPER_BOUND: f64 = 1.0;
const SCALE_LOWER_BOUND: f64 = 0.8;
const SCALE_DURATION: Duration = Duration::from_millis(800);

const SLOW_SPINS: f64 = 2.0;
const FAST_SPINS: f64 = 2.0;
const SPINS_DURATION: Duration = Duration::from_millis(800);

// ============================================================================
// Animation Model
// ============================================================================

/// Layer property an animation drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    StrokeEnd,
    Rotation,
    Scale,
}

impl AnimationKey {
    /// Key the animation is registered under on the layer
    pub fn key(&self) -> &'static str {
        match self {
            AnimationKey::StrokeEnd => "strokeEndAnimation",
            AnimationKey::Rotation => "rotationAnimation",
            AnimationKey::Scale => "scaleAnimation",
        }
    }

    /// Animated property path
    pub fn key_path(&self) -> &'static str {
        match self {
            AnimationKey::StrokeEnd => "strokeEnd",
            AnimationKey::Rotation => "transform.rotation",
            AnimationKey::Scale => "transform.scale",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timing {
    #[default]
    Linear,
    EaseInEaseOut,
}

/// One basic animation segment
#[derive(Clone, Debug, PartialEq)]
pub struct BasicAnimation {
    pub key: AnimationKey,
    pub from: f64,
    pub to: f64,
    /// Offset from the start of the enclosing group
    pub begin_time: Duration,
    /// `None` uses the host's default duration
    pub duration: Option<Duration>,
    /// Adds onto the value reached by the previous repetition
    pub cumulative: bool,
    pub timing: Timing,
}

impl BasicAnimation {
    fn new(key: AnimationKey, from: f64, to: f64, duration: Option<Duration>) -> Self {
        Self {
            key,
            from,
            to,
            begin_time: Duration::ZERO,
            duration,
            cumulative: key == AnimationKey::Rotation,
            timing: match key {
                AnimationKey::Scale => Timing::EaseInEaseOut,
                _ => Timing::Linear,
            },
        }
    }

    fn end_time(&self) -> Duration {
        self.begin_time + self.duration.unwrap_or(Duration::ZERO)
    }
}

/// Segments played back to back, repeated forever
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationGroup {
    pub animations: Vec<BasicAnimation>,
    pub duration: Duration,
}

impl AnimationGroup {
    /// Chain segments so each begins where the previous one ended, in time and value
    pub fn chain(mut animations: Vec<BasicAnimation>) -> Self {
        for i in 1..animations.len() {
            let (previous, rest) = animations.split_at_mut(i);
            let previous = &previous[i - 1];
            let current = &mut rest[0];
            current.begin_time = previous.end_time();
            current.from = previous.to;
        }
        let duration = animations
            .iter()
            .map(|animation| animation.duration.unwrap_or(Duration::ZERO))
            .sum();
        Self { animations, duration }
    }
}

/// An animation installed on the layer
#[derive(Clone, Debug, PartialEq)]
pub enum LayerAnimation {
    Basic(BasicAnimation),
    Looping(AnimationGroup),
}

/// Stroked circular arc the ring is drawn along
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingPath {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub line_width: f64,
}

// ============================================================================
// RefreshControl
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlSize {
    Small,
    #[default]
    Medium,
}

impl ControlSize {
    pub fn size(&self) -> Size {
        match self {
            ControlSize::Small => Size::new(22.0, 22.0),
            ControlSize::Medium => Size::new(24.0, 24.0),
        }
    }
}

/// One-shot haptic pulse played when refreshing starts
pub trait Haptics: Send {
    /// Warm up the actuator
    fn prepare(&mut self) {}
    fn impact(&mut self);
}

pub struct RefreshControl {
    frame: Rect,
    hidden: bool,
    layer_hidden: bool,
    stroke_end: f64,
    refreshing: bool,
    haptics: Option<Box<dyn Haptics>>,
    animations: Vec<LayerAnimation>,
}

impl RefreshControl {
    pub fn new(size: ControlSize) -> Self {
        Self {
            frame: Rect::new(Point::default(), size.size()),
            hidden: false,
            layer_hidden: false,
            stroke_end: 0.0,
            refreshing: false,
            haptics: None,
            animations: Vec::new(),
        }
    }

    /// Pulse `haptics` every time refreshing starts
    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = Some(haptics);
        self
    }

    // Accessors
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the ring layer itself is hidden (independent of the view)
    pub fn is_layer_hidden(&self) -> bool {
        self.layer_hidden
    }

    /// Raw stroke end, possibly past 1.0 on an overscrolled pull
    pub fn stroke_end(&self) -> f64 {
        self.stroke_end
    }

    /// Stroke end as rendered
    pub fn visible_stroke_end(&self) -> f64 {
        self.stroke_end.clamp(0.0, 1.0)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn corner_radius(&self) -> f64 {
        self.frame.size.height / 2.0
    }

    pub fn ring_path(&self) -> RingPath {
        let size = self.frame.size;
        RingPath {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            radius: (size.height - LINE_WIDTH) / 2.0,
            start_angle: START_ANGLE,
            end_angle: END_ANGLE,
            line_width: LINE_WIDTH,
        }
    }

    pub fn animations(&self) -> &[LayerAnimation] {
        &self.animations
    }

    pub fn animation(&self, key: AnimationKey) -> Option<&LayerAnimation> {
        self.animations.iter().find(|animation| animation_key(animation) == key)
    }

    fn remove_animation(&mut self, key: AnimationKey) {
        self.animations.retain(|animation| animation_key(animation) != key);
    }

    fn start_scale_rotate_animations(&mut self) {
        self.remove_animation(AnimationKey::Rotation);
        self.remove_animation(AnimationKey::Scale);

        let full_turn = PI * 2.0;
        let slow_spin = BasicAnimation::new(
            AnimationKey::Rotation,
            0.0,
            full_turn * SLOW_SPINS,
            Some(SPINS_DURATION),
        );
        let fast_spin = BasicAnimation::new(
            AnimationKey::Rotation,
            0.0,
            full_turn * (FAST_SPINS + SLOW_SPINS),
            Some(SPINS_DURATION),
        );
        let scale_up = BasicAnimation::new(
            AnimationKey::Scale,
            SCALE_LOWER_BOUND,
            SCALE_UPPER_BOUND,
            Some(SCALE_DURATION),
        );
        let scale_down = BasicAnimation::new(
            AnimationKey::Scale,
            SCALE_UPPER_BOUND,
            SCALE_LOWER_BOUND,
            Some(SCALE_DURATION),
        );

        self.animations
            .push(LayerAnimation::Looping(AnimationGroup::chain(vec![slow_spin, fast_spin])));
        self.animations
            .push(LayerAnimation::Looping(AnimationGroup::chain(vec![scale_up, scale_down])));
    }

    fn start_haptic(&mut self) {
        if let Some(haptics) = self.haptics.as_mut() {
            haptics.prepare();
            haptics.impact();
        }
    }
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new(ControlSize::default())
    }
}

impl std::fmt::Debug for RefreshControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshControl")
            .field("frame", &self.frame)
            .field("hidden", &self.hidden)
            .field("layer_hidden", &self.layer_hidden)
            .field("stroke_end", &self.stroke_end)
            .field("refreshing", &self.refreshing)
            .field("haptics", &self.haptics.is_some())
            .field("animations", &self.animations)
            .finish()
    }
}

fn animation_key(animation: &LayerAnimation) -> AnimationKey {
    match animation {
        LayerAnimation::Basic(basic) => basic.key,
        LayerAnimation::Looping(group) => group
            .animations
            .first()
            .map(|basic| basic.key)
            .unwrap_or(AnimationKey::Rotation),
    }
}

impl RefreshIndicator for RefreshControl {
    fn size(&self) -> Size {
        self.frame.size
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_progress(&mut self, progress: f64) {
        self.layer_hidden = progress <= HIDDEN_PROGRESS;
        if self.refreshing {
            return;
        }

        self.remove_animation(AnimationKey::StrokeEnd);
        let stroke = BasicAnimation::new(AnimationKey::StrokeEnd, self.stroke_end, progress, None);
        self.stroke_end = progress;
        self.animations.push(LayerAnimation::Basic(stroke));
    }

    fn start_refreshing(&mut self) {
        self.set_progress(1.0);
        self.refreshing = true;
        self.start_haptic();
        self.start_scale_rotate_animations();
    }

    fn end_refreshing(&mut self) {
        self.layer_hidden = true;
        self.refreshing = false;
        self.animations.clear();
    }

    fn resume(&mut self) {
        if self.refreshing {
            self.start_scale_rotate_animations();
        } else {
            self.set_progress(0.0);
        }
    }
}
