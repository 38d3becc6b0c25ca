use multitouch_core::{GestureHandle, GestureTarget, InputSource, PointerInput, WheelInput};

/// Input source driven directly by test code.
///
/// Events emitted before the source is attached are dropped, the way a host
/// drops events nobody listens to.
pub struct ScriptedSource<E> {
    handle: Option<GestureHandle<E>>,
    attach_count: usize,
}

impl<E: GestureTarget> ScriptedSource<E> {
    pub fn new() -> Self {
        Self {
            handle: None,
            attach_count: 0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// How many times a handle attached to this source.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn emit(&self, input: &PointerInput<E>) {
        match &self.handle {
            Some(handle) => handle.dispatch(input),
            None => log::warn!("dropping {:?} {:?}: source not attached", input.source, input.phase),
        }
    }

    pub fn emit_wheel(&self, input: &WheelInput<E>) {
        match &self.handle {
            Some(handle) => handle.dispatch_wheel(input),
            None => log::warn!("dropping wheel input: source not attached"),
        }
    }
}

impl<E: GestureTarget> InputSource<E> for ScriptedSource<E> {
    fn attach(&mut self, handle: GestureHandle<E>) {
        self.attach_count += 1;
        self.handle = Some(handle);
    }
}

impl<E: GestureTarget> Default for ScriptedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}
