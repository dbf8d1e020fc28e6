//! Artistry Studio Common Library
//!
//! サーバー・CLIとWeb(WASM)で共有される型とギャラリーストア

pub mod error;
pub mod gallery;
pub mod placeholder;
pub mod prompt;
pub mod response;
pub mod storage;
pub mod types;

pub use error::{Error, ErrorKind, GenerationError, Result};
pub use gallery::{GalleryState, GalleryStore, ImageReference, GALLERY_STORAGE_KEY};
pub use placeholder::image_placeholder;
pub use prompt::{normalize_prompt, prompt_char_count, truncate_prompt, MAX_PROMPT_CHARS};
pub use response::{interpret_response, TRANSPORT_ERROR_MESSAGE};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use types::{
    ErrorResponse, GenerationOptions, GenerationRequest, GenerationResponse, ImageSize, Quality,
    Style,
};
