//! 画像生成プロバイダ
//!
//! プロバイダは外部の機能として扱い、`generate(options) -> locator | error`
//! の契約だけを定める。

mod openai;

pub use openai::OpenAiProvider;

use artistry_common::{GenerationError, GenerationOptions};
use async_trait::async_trait;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// 1回だけ生成を依頼し、画像のロケータを返す（リトライしない）
    async fn generate(&self, options: &GenerationOptions) -> Result<String, GenerationError>;
}
