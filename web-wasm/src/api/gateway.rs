//! 生成ゲートウェイ（POST /api/）の呼び出し

use artistry_common::{interpret_response, GenerationError, GenerationRequest, TRANSPORT_ERROR_MESSAGE};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const GENERATE_ENDPOINT: &str = "/api/";

/// ゲートウェイにPOSTしてステータスと本文を得る
async fn post_generation(
    request: &GenerationRequest,
    session_token: Option<&str>,
) -> Result<(u16, String), JsValue> {
    let body = serde_json::to_string(request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(GENERATE_ENDPOINT, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    if let Some(token) = session_token {
        request
            .headers()
            .set("Authorization", &format!("Bearer {}", token))?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// 画像を生成してロケータを返す
///
/// 通信自体の失敗は `Unknown error!` にまとめる。
pub async fn request_generation(
    request: &GenerationRequest,
    session_token: Option<&str>,
) -> Result<String, GenerationError> {
    match post_generation(request, session_token).await {
        Ok((status, body)) => interpret_response(status, &body),
        Err(e) => {
            gloo::console::error!(format!("generation request failed: {:?}", e));
            Err(GenerationError::Transport(TRANSPORT_ERROR_MESSAGE.into()))
        }
    }
}
