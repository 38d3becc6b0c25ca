//! Binding registry: which selector gets which gesture callback.

use crate::dispatch::{callback_addr, same_callback, GestureCallback};
use indexmap::IndexMap;
use std::fmt;

/// The two gesture classes the tracker recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    Scroll,
}

impl GestureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::Scroll => "scroll",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered `(selector, kind, callback)` triple.
pub struct Binding<E> {
    selector: String,
    kind: GestureKind,
    callback: GestureCallback<E>,
}

impl<E> Binding<E> {
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn callback(&self) -> &GestureCallback<E> {
        &self.callback
    }
}

impl<E> Clone for Binding<E> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            kind: self.kind,
            callback: self.callback.clone(),
        }
    }
}

impl<E> fmt::Debug for Binding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("selector", &self.selector)
            .field("kind", &self.kind)
            .field("callback", &format_args!("{:#x}", callback_addr(&self.callback)))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct BindingKey {
    selector: String,
    kind: GestureKind,
    callback: usize,
}

/// Ordered set of bindings, de-duplicated on selector, kind and callback
/// identity. Bindings live as long as the registry; there is no removal.
pub struct BindingRegistry<E> {
    bindings: IndexMap<BindingKey, Binding<E>>,
}

impl<E> BindingRegistry<E> {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Registers a tap binding. Returns `false` if it was already present.
    pub fn add_tap(&mut self, selector: impl Into<String>, callback: GestureCallback<E>) -> bool {
        self.add(selector.into(), GestureKind::Tap, callback)
    }

    /// Registers a scroll binding. Returns `false` if it was already present.
    pub fn add_scroll(
        &mut self,
        selector: impl Into<String>,
        callback: GestureCallback<E>,
    ) -> bool {
        self.add(selector.into(), GestureKind::Scroll, callback)
    }

    pub fn add(&mut self, selector: String, kind: GestureKind, callback: GestureCallback<E>) -> bool {
        let key = BindingKey {
            selector,
            kind,
            callback: callback_addr(&callback),
        };
        if let Some(existing) = self.bindings.get(&key) {
            debug_assert!(same_callback(existing.callback(), &callback));
            log::debug!("ignoring duplicate {} binding for `{}`", kind, key.selector);
            return false;
        }
        log::debug!("bound {} to `{}`", kind, key.selector);
        let binding = Binding {
            selector: key.selector.clone(),
            kind,
            callback,
        };
        self.bindings.insert(key, binding);
        true
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<E>> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<E> Default for BindingRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for BindingRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bindings.values()).finish()
    }
}
