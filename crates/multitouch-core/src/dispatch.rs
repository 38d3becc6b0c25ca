//! Deferred callback delivery.
//!
//! The tracker never calls into application code while it is mutating its
//! tracking table. Each input produces a queue of invocations that the owner
//! drains once the tracker is no longer borrowed, so callbacks are free to
//! re-enter (for example to register more bindings) and a panicking callback
//! cannot leave a half-updated record behind.

use crate::geometry::Point;
use crate::input::{PointerId, PointerSource};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Duration;

/// What happened, as seen by the bound callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEventKind {
    /// A tap completed on its target.
    Tap,
    /// A scroll step; `delta` holds the movement since the previous step.
    Scroll,
    /// The host interrupted a scroll; `delta` is measured from the origin.
    ScrollCancel,
}

impl GestureEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureEventKind::Tap => "tap",
            GestureEventKind::Scroll => "scroll",
            GestureEventKind::ScrollCancel => "scroll-cancel",
        }
    }
}

impl fmt::Display for GestureEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to a gesture callback.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent<E> {
    pub kind: GestureEventKind,
    /// Element the gesture is anchored to.
    pub target: E,
    pub pointer: PointerId,
    pub source: PointerSource,
    /// `None` for taps.
    pub delta: Option<Point>,
    /// Contact position of the triggering event. For `ScrollCancel` this is
    /// the origin, mirroring the start event being handed back.
    pub position: Point,
    /// Where the pointer went down.
    pub origin: Point,
    pub timestamp: Duration,
}

/// Application callback bound to a selector.
///
/// Identity (for de-duplication) is the address of the shared allocation, so
/// registering the same `Rc` twice is a no-op while two separately created
/// closures are distinct bindings.
pub type GestureCallback<E> = Rc<dyn Fn(&GestureEvent<E>)>;

/// Wraps a closure into a shareable [`GestureCallback`].
///
/// Keep the returned handle to register the same callback again without
/// creating a second binding.
pub fn gesture_callback<E, F>(callback: F) -> GestureCallback<E>
where
    F: Fn(&GestureEvent<E>) + 'static,
{
    Rc::new(callback)
}

/// Compares two callbacks by allocation address.
pub(crate) fn same_callback<E>(a: &GestureCallback<E>, b: &GestureCallback<E>) -> bool {
    callback_addr(a) == callback_addr(b)
}

pub(crate) fn callback_addr<E>(callback: &GestureCallback<E>) -> usize {
    Rc::as_ptr(callback) as *const () as usize
}

/// Queue of pending callback invocations.
pub struct GestureDispatcher<E> {
    queue: Vec<(GestureCallback<E>, GestureEvent<E>)>,
}

impl<E> GestureDispatcher<E> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, callback: GestureCallback<E>, event: GestureEvent<E>) {
        self.queue.push((callback, event));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Peek at the queued events in delivery order.
    pub fn events(&self) -> impl Iterator<Item = &GestureEvent<E>> {
        self.queue.iter().map(|(_, event)| event)
    }

    pub fn drain<F>(&mut self, mut handler: F)
    where
        F: FnMut(GestureCallback<E>, GestureEvent<E>),
    {
        for (callback, event) in self.queue.drain(..) {
            handler(callback, event);
        }
    }

    /// Invokes every queued callback in order.
    ///
    /// A panicking callback does not stop the rest of the queue; the first
    /// panic is resumed once every delivery has run.
    pub fn deliver(&mut self) {
        let mut first_panic = None;
        self.drain(|callback, event| {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(&event))) {
                log::error!("{} callback for {} panicked", event.kind, event.pointer);
                first_panic.get_or_insert(payload);
            }
        });
        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
    }
}

impl<E> Default for GestureDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for GestureDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("pending", &self.queue.len())
            .finish()
    }
}
