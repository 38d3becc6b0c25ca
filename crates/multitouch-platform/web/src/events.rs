use multitouch_core::{Contact, GestureConfig, Point, PointerId, PointerPhase, PointerSource};
use std::time::Duration;

/// DOM event types a document source may listen for.
pub const LISTENED_EVENTS: &[&str] = &[
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "mousedown",
    "mousemove",
    "mouseup",
    "wheel",
];

/// Maps a DOM event type to the pointer stream it belongs to. Wheel and
/// unknown types yield `None`.
pub fn phase_for(event_type: &str) -> Option<(PointerSource, PointerPhase)> {
    let mapped = match event_type {
        "touchstart" => (PointerSource::Touch, PointerPhase::Start),
        "touchmove" => (PointerSource::Touch, PointerPhase::Move),
        "touchend" => (PointerSource::Touch, PointerPhase::End),
        "touchcancel" => (PointerSource::Touch, PointerPhase::Cancel),
        "mousedown" => (PointerSource::Mouse, PointerPhase::Start),
        "mousemove" => (PointerSource::Mouse, PointerPhase::Move),
        "mouseup" => (PointerSource::Mouse, PointerPhase::End),
        _ => return None,
    };
    Some(mapped)
}

/// How a document listener for one event type is installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
}

/// Options for the listener of `event_type`, or `None` when `config` does
/// not want that event listened for at all.
///
/// Touch listeners are always installed, mouse listeners unless
/// `touch_only`, the wheel listener only with `wheel_scroll`. Move and wheel
/// listeners are passive; move listeners also capture.
pub fn listener_options(event_type: &str, config: &GestureConfig) -> Option<ListenerOptions> {
    match phase_for(event_type) {
        Some((PointerSource::Mouse, _)) if config.touch_only => None,
        Some((_, phase)) => {
            let moving = phase == PointerPhase::Move;
            Some(ListenerOptions {
                capture: moving,
                passive: moving,
            })
        }
        None if event_type == "wheel" && config.wheel_scroll => Some(ListenerOptions {
            capture: false,
            passive: true,
        }),
        None => None,
    }
}

/// `Event.timeStamp` is milliseconds since the time origin.
pub fn timestamp_of(millis: f64) -> Duration {
    if millis.is_finite() && millis > 0.0 {
        Duration::from_secs_f64(millis / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Converts `(identifier, clientX, clientY)` triples of changed touches.
pub fn contacts_from_touches(
    touches: impl IntoIterator<Item = (i32, i32, i32)>,
) -> impl Iterator<Item = Contact> {
    touches
        .into_iter()
        .map(|(id, x, y)| Contact::new(PointerId(id as i64), Point::new(x as f32, y as f32)))
}
