//! Robot-style test rule for gesture scenarios.
//!
//! Owns a [`Document`], a [`GestureHandle`] activated on a
//! [`ScriptedSource`], and a clock. Touch helpers behave like a browser:
//! every event of a touch reports the element the touch started on, while
//! mouse events report whatever element the caller says is under the cursor.
//!
//! # Example
//!
//! ```
//! use multitouch_testing::GestureTestRule;
//!
//! let mut rule = GestureTestRule::new();
//! let map = rule.append("div#map").unwrap();
//! rule.record_scroll("#map");
//!
//! rule.touch_start(7, 100.0, 100.0, &map);
//! rule.touch_move(7, 135.0, 100.0);
//! rule.touch_move(7, 150.0, 100.0);
//! assert_eq!(rule.events().len(), 1);
//! ```

use crate::dom::{Document, Node};
use crate::selector::SelectorError;
use crate::source::ScriptedSource;
use multitouch_core::collections::map::HashMap;
use multitouch_core::{
    gesture_callback, ConfigError, Contact, GestureCallback, GestureConfig, GestureEvent,
    GestureEventKind, GestureHandle, Point, PointerId, PointerInput, PointerPhase, WheelInput,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Default spacing between scripted events.
pub const FRAME: Duration = Duration::from_millis(16);

pub struct GestureTestRule {
    document: Document,
    handle: GestureHandle<Node>,
    source: ScriptedSource<Node>,
    recorded: Rc<RefCell<Vec<GestureEvent<Node>>>>,
    touch_targets: HashMap<PointerId, Node>,
    clock: Duration,
}

impl GestureTestRule {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default()).expect("default gesture config is valid")
    }

    pub fn with_config(config: GestureConfig) -> Result<Self, ConfigError> {
        let handle = GestureHandle::new(config)?;
        let mut source = ScriptedSource::new();
        handle.activate(&mut source);
        Ok(Self {
            document: Document::new(),
            handle,
            source,
            recorded: Rc::new(RefCell::new(Vec::new())),
            touch_targets: HashMap::default(),
            clock: Duration::ZERO,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn handle(&self) -> &GestureHandle<Node> {
        &self.handle
    }

    pub fn source_mut(&mut self) -> &mut ScriptedSource<Node> {
        &mut self.source
    }

    /// Appends an element under `<body>`.
    pub fn append(&self, markup: &str) -> Result<Node, SelectorError> {
        self.document.append(&self.document.body(), markup)
    }

    pub fn append_to(&self, parent: &Node, markup: &str) -> Result<Node, SelectorError> {
        self.document.append(parent, markup)
    }

    /// A callback that appends every event it receives to this rule's log.
    pub fn recorder(&self) -> GestureCallback<Node> {
        let recorded = self.recorded.clone();
        gesture_callback(move |event: &GestureEvent<Node>| recorded.borrow_mut().push(event.clone()))
    }

    /// Binds a fresh recording tap callback to `selector` and returns it.
    pub fn record_tap(&self, selector: &str) -> GestureCallback<Node> {
        let callback = self.recorder();
        self.handle.add_tap(selector, callback.clone());
        callback
    }

    /// Binds a fresh recording scroll callback to `selector` and returns it.
    pub fn record_scroll(&self, selector: &str) -> GestureCallback<Node> {
        let callback = self.recorder();
        self.handle.add_scroll(selector, callback.clone());
        callback
    }

    pub fn events(&self) -> Vec<GestureEvent<Node>> {
        self.recorded.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<GestureEvent<Node>> {
        std::mem::take(&mut *self.recorded.borrow_mut())
    }

    pub fn events_of(&self, kind: GestureEventKind) -> Vec<GestureEvent<Node>> {
        self.recorded
            .borrow()
            .iter()
            .filter(|event| event.kind == kind)
            .cloned()
            .collect()
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    fn tick(&mut self) -> Duration {
        self.clock += FRAME;
        self.clock
    }

    pub fn touch_start(&mut self, id: i64, x: f32, y: f32, target: &Node) {
        self.touch_targets.insert(PointerId(id), target.clone());
        self.touch(PointerPhase::Start, Some(target.clone()), &[(id, x, y)]);
    }

    /// Moves a touch; the event target is the element it started on.
    pub fn touch_move(&mut self, id: i64, x: f32, y: f32) {
        let target = self.touch_targets.get(&PointerId(id)).cloned();
        self.touch(PointerPhase::Move, target, &[(id, x, y)]);
    }

    /// Moves a touch while the host reports a different target element.
    pub fn touch_move_over(&mut self, id: i64, x: f32, y: f32, target: &Node) {
        self.touch(PointerPhase::Move, Some(target.clone()), &[(id, x, y)]);
    }

    pub fn touch_end(&mut self, id: i64, x: f32, y: f32) {
        let target = self.touch_targets.remove(&PointerId(id));
        self.touch(PointerPhase::End, target, &[(id, x, y)]);
    }

    pub fn touch_end_over(&mut self, id: i64, x: f32, y: f32, target: &Node) {
        self.touch_targets.remove(&PointerId(id));
        self.touch(PointerPhase::End, Some(target.clone()), &[(id, x, y)]);
    }

    pub fn touch_cancel(&mut self, id: i64, x: f32, y: f32) {
        let target = self.touch_targets.remove(&PointerId(id));
        self.touch(PointerPhase::Cancel, target, &[(id, x, y)]);
    }

    /// Emits one touch event carrying several changed contacts.
    pub fn touch(&mut self, phase: PointerPhase, target: Option<Node>, contacts: &[(i64, f32, f32)]) {
        let timestamp = self.tick();
        let input = PointerInput::touch(
            phase,
            target,
            contacts
                .iter()
                .map(|&(id, x, y)| Contact::new(PointerId(id), Point::new(x, y))),
        )
        .at(timestamp);
        self.source.emit(&input);
    }

    pub fn mouse_down(&mut self, x: f32, y: f32, target: &Node) {
        self.mouse(PointerPhase::Start, x, y, target);
    }

    pub fn mouse_move(&mut self, x: f32, y: f32, target: &Node) {
        self.mouse(PointerPhase::Move, x, y, target);
    }

    pub fn mouse_up(&mut self, x: f32, y: f32, target: &Node) {
        self.mouse(PointerPhase::End, x, y, target);
    }

    fn mouse(&mut self, phase: PointerPhase, x: f32, y: f32, target: &Node) {
        let timestamp = self.tick();
        let input =
            PointerInput::mouse(phase, Some(target.clone()), Point::new(x, y)).at(timestamp);
        self.source.emit(&input);
    }

    pub fn wheel(&mut self, x: f32, y: f32, dx: f32, dy: f32, target: &Node) {
        let timestamp = self.tick();
        let input = WheelInput::new(Some(target.clone()), Point::new(x, y), Point::new(dx, dy))
            .at(timestamp);
        self.source.emit_wheel(&input);
    }

    /// Straight-line touch drag from `from` to `to` in `steps` moves,
    /// ending the touch afterwards.
    pub fn touch_drag(&mut self, id: i64, from: Point, to: Point, steps: u32, target: &Node) {
        self.touch_start(id, from.x, from.y, target);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.touch_move(
                id,
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            );
        }
        self.touch_end(id, to.x, to.y);
    }

    /// Tap at a point: start and end with no movement.
    pub fn tap(&mut self, id: i64, x: f32, y: f32, target: &Node) {
        self.touch_start(id, x, y, target);
        self.touch_end(id, x, y);
    }
}

impl Default for GestureTestRule {
    fn default() -> Self {
        Self::new()
    }
}
