//! Browser adapter: feeds DOM touch, mouse and wheel events into a
//! [`GestureHandle`].
//!
//! ```ignore
//! let gestures = GestureHandle::new(GestureConfig::default())?;
//! gestures.add_tap(".zoom-in", gesture_callback(|_| zoom_in()));
//! let mut source = DocumentSource::new(document, gestures.config());
//! gestures.activate(&mut source);
//! // keep `source` alive; dropping it removes the listeners
//! ```

mod events;

pub use events::{
    contacts_from_touches, listener_options, phase_for, timestamp_of, ListenerOptions,
    LISTENED_EVENTS,
};

use multitouch_core::{
    GestureConfig, GestureHandle, GestureTarget, InputSource, Point, PointerInput, PointerPhase,
    PointerSource, WheelInput,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent, TouchEvent, WheelEvent};

/// A DOM element as seen by the gesture tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct DomTarget(pub Element);

impl DomTarget {
    pub fn element(&self) -> &Element {
        &self.0
    }

    fn from_event(event: &Event) -> Option<Self> {
        event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map(DomTarget)
    }
}

impl GestureTarget for DomTarget {
    fn closest(&self, selector: &str) -> Option<Self> {
        match self.0.closest(selector) {
            Ok(found) => found.map(DomTarget),
            Err(err) => {
                log::warn!("closest({selector:?}) failed: {err:?}");
                None
            }
        }
    }
}

struct Listener {
    event: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

/// Document-level listener set. Touch listeners are always installed, mouse
/// listeners only when `touch_only` is off, the wheel listener only when
/// `wheel_scroll` is on. Listeners are removed on drop.
pub struct DocumentSource {
    document: web_sys::Document,
    config: GestureConfig,
    listeners: Vec<Listener>,
}

impl DocumentSource {
    pub fn new(document: web_sys::Document, config: GestureConfig) -> Self {
        Self {
            document,
            config,
            listeners: Vec::new(),
        }
    }

    /// Source bound to `window.document`.
    pub fn for_window(config: GestureConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        let document = window.document().ok_or("should have a document on window")?;
        Ok(Self::new(document, config))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn listen(
        &mut self,
        event: &'static str,
        listener: ListenerOptions,
        handle: &GestureHandle<DomTarget>,
    ) -> Result<(), JsValue> {
        let handle = handle.clone();
        let closure = match phase_for(event) {
            Some((source, phase)) => Closure::wrap(Box::new(move |event: Event| {
                if let Some(input) = pointer_input(source, phase, &event) {
                    handle.dispatch(&input);
                }
            }) as Box<dyn FnMut(Event)>),
            None => Closure::wrap(Box::new(move |event: Event| {
                if let Some(input) = wheel_input(&event) {
                    handle.dispatch_wheel(&input);
                }
            }) as Box<dyn FnMut(Event)>),
        };

        let options = AddEventListenerOptions::new();
        options.set_capture(listener.capture);
        options.set_passive(listener.passive);
        self.document.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener {
            event,
            capture: listener.capture,
            closure,
        });
        Ok(())
    }
}

impl InputSource<DomTarget> for DocumentSource {
    fn attach(&mut self, handle: GestureHandle<DomTarget>) {
        for &event in LISTENED_EVENTS {
            let Some(listener) = listener_options(event, &self.config) else {
                continue;
            };
            if let Err(err) = self.listen(event, listener, &handle) {
                log::error!("failed to listen for {event}: {err:?}");
            }
        }
        log::debug!("document source attached {} listeners", self.listeners.len());
    }
}

impl Drop for DocumentSource {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = self.document.remove_event_listener_with_callback_and_bool(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
                listener.capture,
            );
        }
    }
}

fn pointer_input(source: PointerSource, phase: PointerPhase, event: &Event) -> Option<PointerInput<DomTarget>> {
    let target = DomTarget::from_event(event);
    let timestamp = timestamp_of(event.time_stamp());
    let input = match source {
        PointerSource::Touch => {
            let touches = event.dyn_ref::<TouchEvent>()?.changed_touches();
            let contacts = (0..touches.length()).filter_map(|i| touches.get(i)).map(|touch| {
                (touch.identifier(), touch.client_x(), touch.client_y())
            });
            PointerInput::touch(phase, target, contacts_from_touches(contacts))
        }
        PointerSource::Mouse => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            let position = Point::new(mouse.client_x() as f32, mouse.client_y() as f32);
            PointerInput::mouse(phase, target, position)
        }
    };
    Some(input.at(timestamp))
}

fn wheel_input(event: &Event) -> Option<WheelInput<DomTarget>> {
    let wheel = event.dyn_ref::<WheelEvent>()?;
    let position = Point::new(wheel.client_x() as f32, wheel.client_y() as f32);
    let delta = Point::new(wheel.delta_x() as f32, wheel.delta_y() as f32);
    Some(
        WheelInput::new(DomTarget::from_event(event), position, delta)
            .at(timestamp_of(event.time_stamp())),
    )
}

/// Installs the panic hook and routes `log` to the browser console.
#[cfg(feature = "console-logging")]
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}
