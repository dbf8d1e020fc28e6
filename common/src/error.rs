//! エラー型定義

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 共通エラー型（ギャラリー・ストレージ）
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Gallery could not be saved: {0}")]
    Persistence(String),

    #[error("Invalid locator: {0:?}")]
    InvalidLocator(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 画面に出すエラー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Authorization,
    InvalidRequest,
    Provider,
    Transport,
    Persistence,
}

/// 画像生成のエラー
///
/// ゲートウェイ（サーバー）とクライアントで共有する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("{0}")]
    Transport(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Unauthorized => ErrorKind::Authorization,
            GenerationError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            GenerationError::Provider { .. } => ErrorKind::Provider,
            GenerationError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// HTTPステータス
    pub fn status(&self) -> u16 {
        match self {
            GenerationError::Unauthorized => 401,
            GenerationError::InvalidRequest(_) => 400,
            GenerationError::Provider { status, .. } => *status,
            GenerationError::Transport(_) => 500,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLocator(_) => ErrorKind::InvalidRequest,
            Error::Storage(_) | Error::Persistence(_) | Error::Json(_) => ErrorKind::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_persistence() {
        let error = Error::Persistence("quota exceeded".to_string());
        assert_eq!(format!("{}", error), "Gallery could not be saved: quota exceeded");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_unauthorized_message() {
        let error = GenerationError::Unauthorized;
        assert_eq!(error.to_string(), "Unauthorized");
        assert_eq!(error.status(), 401);
        assert_eq!(error.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_provider_error_keeps_status_and_message() {
        let error = GenerationError::Provider {
            status: 429,
            message: "Rate limit reached".to_string(),
        };
        assert_eq!(error.status(), 429);
        assert_eq!(error.to_string(), "Rate limit reached");
        assert_eq!(error.kind(), ErrorKind::Provider);
    }

    #[test]
    fn test_transport_error_is_500() {
        let error = GenerationError::Transport("connection reset".to_string());
        assert_eq!(error.status(), 500);
        assert_eq!(error.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_persistence_kind_is_distinct() {
        let error = Error::Persistence("disabled".to_string());
        assert_eq!(error.kind(), ErrorKind::Persistence);
        assert_ne!(error.kind(), GenerationError::Transport(String::new()).kind());
    }
}
