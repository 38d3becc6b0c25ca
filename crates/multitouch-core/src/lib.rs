//! Multi-pointer tap and scroll recognition.
//!
//! Raw pointer streams (any number of touch contacts plus an optional mouse)
//! are classified per pointer into taps and scrolls, and delivered to
//! callbacks bound to element selectors.
//!
//! ```ignore
//! let gestures = GestureHandle::new(GestureConfig::default())?;
//! gestures.add_scroll("#map", gesture_callback(|event| pan(event.delta)));
//! gestures.add_tap(".zoom-in", gesture_callback(|_| zoom_in()));
//! gestures.activate(&mut DocumentSource::new(document, gestures.config()));
//! ```

pub mod binding;
pub mod collections;
pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod gesture_constants;
pub mod handle;
pub mod input;
pub mod target;
pub mod tracker;

pub use binding::{Binding, BindingRegistry, GestureKind};
pub use config::{ConfigError, GestureConfig};
pub use dispatch::{
    gesture_callback, GestureCallback, GestureDispatcher, GestureEvent, GestureEventKind,
};
pub use geometry::Point;
pub use handle::{GestureHandle, InputSource};
pub use input::{Contact, Contacts, PointerId, PointerInput, PointerPhase, PointerSource, WheelInput};
pub use target::{resolve_target, GestureTarget};
pub use tracker::{GestureTracker, Origin, SourcePolicy, TrackingRecord};

pub mod prelude {
    pub use crate::binding::GestureKind;
    pub use crate::config::GestureConfig;
    pub use crate::dispatch::{gesture_callback, GestureCallback, GestureEvent, GestureEventKind};
    pub use crate::geometry::Point;
    pub use crate::handle::{GestureHandle, InputSource};
    pub use crate::input::prelude::*;
    pub use crate::target::{resolve_target, GestureTarget};
}
