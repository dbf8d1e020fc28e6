//! OpenAI Images API連携

use super::ImageProvider;
use crate::config::Config;
use crate::error::Result;
use artistry_common::{GenerationError, GenerationOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const IMAGES_PATH: &str = "/v1/images/generations";

/// Images APIリクエスト
#[derive(Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    n: u8,
    prompt: &'a str,
    quality: &'a str,
    style: &'a str,
    size: &'a str,
}

/// Images APIレスポンス
#[derive(Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

/// Images APIエラー
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), IMAGES_PATH),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.model.clone(),
            &config.api_base_url,
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    async fn generate(&self, options: &GenerationOptions) -> std::result::Result<String, GenerationError> {
        let body = ImagesRequest {
            model: &self.model,
            n: 1,
            prompt: &options.prompt,
            quality: options.quality.as_str(),
            style: options.style.as_str(),
            size: options.size.as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Image generation failed")
                        .to_string()
                });
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ImagesResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Transport(format!("invalid provider response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| GenerationError::Transport("provider returned no image".into()))
    }
}
