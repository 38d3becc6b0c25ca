//! Application-owned handle around one [`GestureTracker`].
//!
//! The handle is what views keep to register bindings and what input
//! sources keep to feed events. It is single-threaded: every event is
//! processed to completion on the host's event loop before the next one.

use crate::config::{ConfigError, GestureConfig};
use crate::dispatch::{GestureCallback, GestureDispatcher};
use crate::input::{PointerId, PointerInput, WheelInput};
use crate::target::GestureTarget;
use crate::tracker::{GestureTracker, TrackingRecord};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Something that produces pointer events for a tracker, typically by
/// installing listeners on a host event target.
pub trait InputSource<E: GestureTarget> {
    /// Starts forwarding events to `handle`. Called at most once per handle.
    fn attach(&mut self, handle: GestureHandle<E>);
}

struct Inner<E> {
    tracker: RefCell<GestureTracker<E>>,
    activated: Cell<bool>,
}

/// Shared, cloneable owner of a gesture tracker.
pub struct GestureHandle<E> {
    inner: Rc<Inner<E>>,
}

impl<E: GestureTarget> GestureHandle<E> {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Rc::new(Inner {
                tracker: RefCell::new(GestureTracker::new(config)?),
                activated: Cell::new(false),
            }),
        })
    }

    pub fn config(&self) -> GestureConfig {
        self.inner.tracker.borrow().config().clone()
    }

    /// Registers a tap binding. Returns `false` for an identical repeat.
    pub fn add_tap(&self, selector: impl Into<String>, callback: GestureCallback<E>) -> bool {
        self.inner.tracker.borrow_mut().add_tap(selector, callback)
    }

    /// Registers a scroll binding. Returns `false` for an identical repeat.
    pub fn add_scroll(&self, selector: impl Into<String>, callback: GestureCallback<E>) -> bool {
        self.inner.tracker.borrow_mut().add_scroll(selector, callback)
    }

    /// Attaches `source` to this handle, once.
    ///
    /// Returns `false` without touching `source` if the handle was already
    /// activated, so listeners are never installed twice.
    pub fn activate(&self, source: &mut dyn InputSource<E>) -> bool {
        if self.inner.activated.replace(true) {
            log::warn!("gesture tracker already activated; ignoring");
            return false;
        }
        source.attach(self.clone());
        log::info!("gesture tracker activated");
        true
    }

    pub fn is_activated(&self) -> bool {
        self.inner.activated.get()
    }

    /// Processes one pointer event and then runs the resulting callbacks.
    ///
    /// The tracker is released before any callback runs.
    pub fn dispatch(&self, input: &PointerInput<E>) {
        let mut dispatcher = GestureDispatcher::new();
        self.inner.tracker.borrow_mut().handle(input, &mut dispatcher);
        dispatcher.deliver();
    }

    /// Processes one wheel event and then runs the resulting callbacks.
    pub fn dispatch_wheel(&self, input: &WheelInput<E>) {
        let mut dispatcher = GestureDispatcher::new();
        self.inner
            .tracker
            .borrow_mut()
            .handle_wheel(input, &mut dispatcher);
        dispatcher.deliver();
    }

    /// Snapshot of the records held for `pointer`.
    pub fn records(&self, pointer: PointerId) -> Vec<TrackingRecord<E>> {
        self.inner.tracker.borrow().records(pointer).to_vec()
    }

    pub fn tracked_pointer_count(&self) -> usize {
        self.inner.tracker.borrow().tracked_pointer_count()
    }

    pub fn binding_count(&self) -> usize {
        self.inner.tracker.borrow().bindings().len()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.tracker.borrow().is_idle()
    }

    /// Runs `f` with read access to the tracker.
    pub fn with_tracker<R>(&self, f: impl FnOnce(&GestureTracker<E>) -> R) -> R {
        f(&self.inner.tracker.borrow())
    }
}

impl<E> Clone for GestureHandle<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for GestureHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.tracker.try_borrow() {
            Ok(tracker) => f
                .debug_struct("GestureHandle")
                .field("tracker", &*tracker)
                .field("activated", &self.inner.activated.get())
                .finish(),
            Err(_) => f.write_str("GestureHandle { <dispatching> }"),
        }
    }
}
