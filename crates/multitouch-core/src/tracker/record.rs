use crate::binding::GestureKind;
use crate::dispatch::{callback_addr, GestureCallback};
use crate::geometry::Point;
use crate::input::PointerId;
use std::fmt;
use std::time::Duration;

/// Where and when a pointer went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub position: Point,
    pub timestamp: Duration,
}

/// In-progress classification of one pointer against one bound target.
pub struct TrackingRecord<E> {
    pub(crate) pointer: PointerId,
    pub(crate) kind: GestureKind,
    pub(crate) target: E,
    pub(crate) selector: String,
    pub(crate) callback: GestureCallback<E>,
    pub(crate) origin: Origin,
    pub(crate) last_emitted: Point,
    pub(crate) valid: bool,
    pub(crate) last_seen: Duration,
}

impl<E> TrackingRecord<E> {
    pub(crate) fn new(
        pointer: PointerId,
        kind: GestureKind,
        target: E,
        selector: &str,
        callback: GestureCallback<E>,
        origin: Origin,
    ) -> Self {
        Self {
            pointer,
            kind,
            target,
            selector: selector.to_owned(),
            callback,
            origin,
            last_emitted: origin.position,
            // A tap is a tap until it moves too far; a scroll is not a scroll
            // until it does.
            valid: kind == GestureKind::Tap,
            last_seen: origin.timestamp,
        }
    }

    /// A repeated start for the same pointer, kind and target.
    ///
    /// Scrolls must clear the activation threshold again; taps are restored.
    /// The origin is kept.
    pub(crate) fn rearm(&mut self, target: E, timestamp: Duration) {
        self.target = target;
        self.valid = self.kind == GestureKind::Tap;
        self.last_seen = timestamp;
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn last_emitted(&self) -> Point {
        self.last_emitted
    }

    /// For taps: still a tap. For scrolls: armed and emitting.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_seen(&self) -> Duration {
        self.last_seen
    }
}

impl<E: Clone> Clone for TrackingRecord<E> {
    fn clone(&self) -> Self {
        Self {
            pointer: self.pointer,
            kind: self.kind,
            target: self.target.clone(),
            selector: self.selector.clone(),
            callback: self.callback.clone(),
            origin: self.origin,
            last_emitted: self.last_emitted,
            valid: self.valid,
            last_seen: self.last_seen,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for TrackingRecord<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingRecord")
            .field("pointer", &self.pointer)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("selector", &self.selector)
            .field("callback", &format_args!("{:#x}", callback_addr(&self.callback)))
            .field("origin", &self.origin)
            .field("last_emitted", &self.last_emitted)
            .field("valid", &self.valid)
            .finish()
    }
}
