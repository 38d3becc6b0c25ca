//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Both thresholds are in CSS (logical) pixels and are compared against the
//! Chebyshev displacement of a pointer from where it went down, i.e. the
//! larger of the horizontal and vertical distance.

/// Activation threshold in logical pixels.
///
/// If a pointer moves more than this distance from its start position:
/// - Scroll gestures arm (deltas are emitted from the next move on)
/// - Tap gestures are cancelled (tap won't fire on release)
pub const DEFAULT_MIN_SCROLL: f32 = 20.0;

/// Ceiling in logical pixels for touch scroll deltas.
///
/// Touch moves further than this from the start position stop emitting
/// deltas and only re-baseline the scroll.
pub const DEFAULT_MAX_SCROLL: f32 = 250.0;
