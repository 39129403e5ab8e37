//! # community-portal
//!
//! Settings and record storage for the community management site: leave
//! requests, deliveries, reports, fines, the house list and user groups.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same code runs in the browser (feature `hydrate`, backed by
//! `localStorage`, the DOM and `gloo-net`) and natively (file-backed storage,
//! `reqwest`) for the admin CLI and tests. Every accessor goes through an
//! explicit [`storage::Storage`] handle owned by a [`store::Store`].

pub mod config;
pub mod error;
pub mod feedback;
pub mod page;
pub mod records;
pub mod settings;
pub mod storage;
pub mod store;
pub mod theme;
pub mod util;
pub mod webhook;

pub use error::{ErrorCode, StoreError};
pub use settings::Settings;
pub use storage::Storage;
pub use store::Store;

/// Browser entry point: route Rust panics to the devtools console.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
