use super::state::AppState;
use crate::session::{authorize, bearer_token};
use artistry_common::{
    ErrorResponse, GenerationError, GenerationRequest, GenerationResponse, TRANSPORT_ERROR_MESSAGE,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::warn;

/// `{ "error": message }` で返すエラー
pub struct ApiError(pub GenerationError);

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        // 通信エラーの詳細（接続先URLなど）はログにだけ残す
        let error = match &self.0 {
            GenerationError::Transport(_) => TRANSPORT_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let session = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .and_then(|token| state.sessions.get_session(token));

    // 認証が必要な場合はボディより先に判定する
    authorize(session.as_ref(), state.gateway.require_session())?;

    let Json(request) = payload.map_err(|rejection| {
        warn!("Malformed payload: {}", rejection.body_text());
        GenerationError::InvalidRequest(rejection.body_text())
    })?;

    let image = state
        .gateway
        .request_generation(session.as_ref(), &request)
        .await?;

    Ok(Json(GenerationResponse { image }))
}
