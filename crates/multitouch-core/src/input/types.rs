use crate::geometry::Point;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::time::Duration;

/// Stable identity of one pointer for the duration of an interaction.
///
/// Touch contacts carry the host's identifier. The mouse is a single
/// synthetic pointer with the fixed [`PointerId::MOUSE`] id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct PointerId(pub i64);

impl PointerId {
    /// Sentinel used for the mouse. Host touch identifiers are never negative.
    pub const MOUSE: PointerId = PointerId(-1);

    pub fn is_mouse(self) -> bool {
        self == Self::MOUSE
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mouse() {
            f.write_str("mouse")
        } else {
            write!(f, "touch#{}", self.0)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Touch,
    Mouse,
}

/// One changed contact of a host event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub id: PointerId,
    pub position: Point,
}

impl Contact {
    pub fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Changed contacts of one event. Most events carry one or two.
pub type Contacts = SmallVec<[Contact; 4]>;

/// A single pointer lifecycle event as delivered by the host.
///
/// `target` is the element the host reports for the whole event. For touch
/// this is the element the touch started on; for the mouse it is the element
/// currently under the cursor. It is `None` when the host reported something
/// that is not an element.
#[derive(Clone, Debug)]
pub struct PointerInput<E> {
    pub source: PointerSource,
    pub phase: PointerPhase,
    pub target: Option<E>,
    pub contacts: Contacts,
    pub timestamp: Duration,
}

impl<E> PointerInput<E> {
    /// Builds a touch event carrying every changed contact.
    pub fn touch(
        phase: PointerPhase,
        target: Option<E>,
        contacts: impl IntoIterator<Item = Contact>,
    ) -> Self {
        Self {
            source: PointerSource::Touch,
            phase,
            target,
            contacts: contacts.into_iter().collect(),
            timestamp: Duration::ZERO,
        }
    }

    /// Builds a mouse event for the synthetic mouse pointer.
    pub fn mouse(phase: PointerPhase, target: Option<E>, position: Point) -> Self {
        Self {
            source: PointerSource::Mouse,
            phase,
            target,
            contacts: smallvec![Contact::new(PointerId::MOUSE, position)],
            timestamp: Duration::ZERO,
        }
    }

    /// Set the host timestamp of this event.
    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A wheel (or trackpad scroll) event.
#[derive(Clone, Debug)]
pub struct WheelInput<E> {
    pub target: Option<E>,
    pub position: Point,
    pub delta: Point,
    pub timestamp: Duration,
}

impl<E> WheelInput<E> {
    pub fn new(target: Option<E>, position: Point, delta: Point) -> Self {
        Self {
            target,
            position,
            delta,
            timestamp: Duration::ZERO,
        }
    }

    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = timestamp;
        self
    }
}
