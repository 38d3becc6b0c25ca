pub mod types;

pub use types::{Contact, Contacts, PointerId, PointerInput, PointerPhase, PointerSource, WheelInput};

pub mod prelude {
    pub use super::types::{
        Contact, Contacts, PointerId, PointerInput, PointerPhase, PointerSource, WheelInput,
    };
}
