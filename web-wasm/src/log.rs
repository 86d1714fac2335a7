//! ブラウザのコンソール出力

use wasm_bindgen::JsValue;

pub fn debug(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
