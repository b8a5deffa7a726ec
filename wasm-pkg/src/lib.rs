//! Chemlab browser package
//!
//! Build with `wasm-pack build --target web` and load from the renderer.

use wasm_bindgen::prelude::*;

// Re-export main types from parent crate
pub use chemlab::wasm::*;

/// Get package version
#[wasm_bindgen]
pub fn package_version() -> String {
    format!("chemlab-wasm v{}", env!("CARGO_PKG_VERSION"))
}
