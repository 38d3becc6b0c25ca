//! Hash collections used for per-pointer state.
//!
//! Pointer ids are small integers picked by the host, so the default hasher
//! is FxHash. Enable `std-hash` to fall back to SipHash.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}
