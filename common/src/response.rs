//! エンドポイント応答の解釈（クライアント側）

use crate::error::GenerationError;
use crate::types::{ErrorResponse, GenerationResponse};

/// 通信失敗時に表示するメッセージ
pub const TRANSPORT_ERROR_MESSAGE: &str = "Unknown error!";

/// HTTPステータスと本文からロケータかエラーを得る
///
/// - 2xx: `{ "image": ... }` を読む。読めなければ通信エラー扱い
/// - 401: 認証エラー
/// - それ以外: `{ "error": ... }` のメッセージ、無ければ `HTTP error! status: N`
pub fn interpret_response(status: u16, body: &str) -> Result<String, GenerationError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<GenerationResponse>(body)
            .map(|r| r.image)
            .map_err(|_| GenerationError::Transport(TRANSPORT_ERROR_MESSAGE.into()));
    }

    if status == 401 {
        return Err(GenerationError::Unauthorized);
    }

    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|r| r.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status));

    Err(GenerationError::Provider { status, message })
}
