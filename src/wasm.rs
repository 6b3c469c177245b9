use wasm_bindgen::prelude::*;

use crate::config::CompileOptions;
use crate::pipeline::compile_with_report;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Compile a script and return the report as JSON:
/// `{ "lines": [[descriptor, ...], ...], "diagnostics": [...] }`.
///
/// `options_json` is an optional `CompileOptions` object. Unparseable options
/// fall back to the defaults.
#[wasm_bindgen]
pub fn compile_script(text: &str, options_json: Option<String>) -> String {
    let options = match options_json.as_deref() {
        Some(json) => CompileOptions::from_json(json).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid compile options: {}", e);
            CompileOptions::default()
        }),
        None => CompileOptions::default(),
    };

    let report = compile_with_report(text, &options);
    serde_json::to_string(&report).unwrap_or_else(|e| {
        log::error!("Failed to serialize compile report: {}", e);
        "{\"lines\":[],\"diagnostics\":[]}".to_string()
    })
}
