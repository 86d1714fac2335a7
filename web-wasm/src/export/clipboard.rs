//! クリップボードへの書き込み

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await?;
    Ok(())
}
