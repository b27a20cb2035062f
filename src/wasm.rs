//! WASM bindings for the spectrum engine
//!
//! Lets a browser front end compute spectra locally from the same JSON
//! request the HTTP server accepts.

use wasm_bindgen::prelude::*;

use crate::request::{run_request, SpectrumRequest, SpectrumResponse};

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Compute a response spectrum from a JSON `SpectrumRequest`
#[wasm_bindgen]
pub fn response_spectrum(request_json: &str) -> String {
    let start = js_sys::Date::now();

    let result = SpectrumRequest::from_json(request_json).and_then(|request| run_request(&request));
    let response = SpectrumResponse::from_result(result, Some(js_sys::Date::now() - start));

    if let Some(error) = &response.error {
        web_sys::console::warn_1(&JsValue::from_str(error));
    }

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
