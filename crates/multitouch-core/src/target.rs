//! Selector based target resolution.
//!
//! A gesture is anchored to the nearest ancestor (self included) of the
//! event target that matches the bound selector. The element tree itself is
//! owned by the host; this crate only needs the ancestor lookup.

use std::fmt::Debug;

/// An element of the host's tree that gestures can be anchored to.
///
/// Equality must be element identity: two handles compare equal exactly when
/// they refer to the same element.
pub trait GestureTarget: Clone + PartialEq + Debug {
    /// Returns the nearest ancestor-or-self matching `selector`.
    ///
    /// Selectors the host cannot parse match nothing.
    fn closest(&self, selector: &str) -> Option<Self>;
}

/// Resolves the element a gesture bound to `selector` anchors to.
pub fn resolve_target<E: GestureTarget>(element: &E, selector: &str) -> Option<E> {
    element.closest(selector)
}

/// Resolves against an optional event target.
pub(crate) fn resolve_live<E: GestureTarget>(element: Option<&E>, selector: &str) -> Option<E> {
    element.and_then(|element| resolve_target(element, selector))
}
