use artistry_common::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`artistry-studio config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("画像生成エラー: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Gallery(#[from] artistry_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;
