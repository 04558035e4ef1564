//! WebAssembly bindings for Flowsmith
//!
//! Browser-facing wrappers around the state-machine adapter and the slug
//! helper. Errors surface as JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::core::slugify;

/// Initialize WASM module
///
/// Sets up the panic hook and routes `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Render state-machine JSON to Mermaid flowchart text
///
/// # Arguments
/// * `machine_json` - The machine description
/// * `styles_json` - Optional style table; the built-in table is used when absent
#[wasm_bindgen]
pub fn render_state_machine(machine_json: &str, styles_json: Option<String>) -> Result<String, JsValue> {
    crate::render_state_machine(machine_json, styles_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Identifier-safe slug of `text`
#[wasm_bindgen]
pub fn slug(text: &str) -> String {
    slugify(text)
}
