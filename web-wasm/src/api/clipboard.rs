//! クリップボード読み取り
//!
//! `navigator.clipboard.readText()` を呼ぶ。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

pub async fn read_clipboard_text() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard API is not available"));
    }

    let read_text: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &JsValue::from_str("readText"))?.dyn_into()?;
    let promise: js_sys::Promise = read_text.call0(&clipboard)?.dyn_into()?;

    JsFuture::from(promise)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("clipboard content is not text"))
}
