//! WebAssembly bindings for the browser renderer.
//!
//! The render loop owns a [`WasmLab`], forwards user actions as JSON
//! [`LabAction`] strings and reads the state back as a JSON snapshot every
//! frame.
//!
//! # Architecture
//!
//! ```text
//! Browser JS → wasm-bindgen → WasmLab::dispatch(json) → LabStore
//!                                  ↓
//!                        WasmLab::snapshot() → LabState JSON → renderer
//! ```

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

use crate::chemistry::ph_to_color;
use crate::lab::{LabAction, LabConfig, LabStore};

/// Initialize WASM module with panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Indicator color for a pH value as `#rrggbb`.
#[wasm_bindgen]
pub fn ph_color(ph: f64) -> String {
    ph_to_color(ph).to_hex()
}

/// Interaction store exposed to JavaScript.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WasmLab {
    store: LabStore,
}

#[wasm_bindgen]
impl WasmLab {
    /// Lab with the default fixtures and ten tests to complete.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lab expecting `total_tests` completed tests.
    ///
    /// # Errors
    ///
    /// Returns an error string if `total_tests` is zero.
    #[wasm_bindgen(js_name = withTotalTests)]
    pub fn with_total_tests(total_tests: u32) -> Result<WasmLab, JsValue> {
        let config = LabConfig::builder()
            .total_tests(total_tests)
            .build()
            .map_err(to_js)?;
        Ok(Self {
            store: LabStore::with_config(config),
        })
    }

    /// Apply a JSON-encoded action, e.g. `{"action":"toggleBunsenBurner"}`.
    ///
    /// Returns the JSON-encoded outcome.
    ///
    /// # Errors
    ///
    /// Returns an error string if the action does not parse.
    #[wasm_bindgen]
    pub fn dispatch(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: LabAction = serde_json::from_str(action_json).map_err(to_js)?;
        let outcome = self.store.dispatch(action);
        serde_json::to_string(&outcome).map_err(to_js)
    }

    /// Current state as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.state()).map_err(to_js)
    }

    /// Completed tests as a percentage of the total (may exceed 100).
    #[wasm_bindgen]
    pub fn progress(&self) -> f64 {
        self.store.progress_percent()
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
