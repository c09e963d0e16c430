use folio_protocol::LogLevel;
use wasm_bindgen::JsValue;
use web_sys::console;

pub fn emit(level: LogLevel, message: &str) {
    match level {
        LogLevel::Info => info(message),
        LogLevel::Warn => warn(message),
    }
}

pub fn info(message: &str) {
    console::info_1(&format!("folio: {message}").into());
}

pub fn warn(message: &str) {
    console::warn_1(&format!("folio: {message}").into());
}

/// Warn with the raw JS error attached, so devtools can expand it.
pub fn warn_js(message: &str, err: &JsValue) {
    console::warn_2(&format!("folio: {message}").into(), err);
}

pub fn error_js(message: &str, err: &JsValue) {
    console::error_2(&format!("folio: {message}").into(), err);
}
