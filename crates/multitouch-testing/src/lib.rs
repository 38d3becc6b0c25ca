//! Testing utilities and harness for multitouch

pub mod dom;
pub mod rule;
pub mod selector;
pub mod source;

pub use dom::{Document, Node};
pub use rule::{GestureTestRule, FRAME};
pub use selector::{SelectorError, SelectorList};
pub use source::ScriptedSource;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub mod prelude {
    pub use crate::dom::{Document, Node};
    pub use crate::init_test_logging;
    pub use crate::rule::*;
    pub use crate::source::ScriptedSource;
}
