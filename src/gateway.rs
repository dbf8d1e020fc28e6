//! 生成ゲートウェイ
//!
//! セッション判定 → パラメータ検証 → プロバイダ呼び出し（1回のみ）。

use crate::provider::ImageProvider;
use crate::session::{authorize, Session};
use artistry_common::{GenerationError, GenerationOptions, GenerationRequest};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn ImageProvider>,
    require_session: bool,
}

impl Gateway {
    pub fn new(provider: Arc<dyn ImageProvider>, require_session: bool) -> Self {
        Self {
            provider,
            require_session,
        }
    }

    pub fn require_session(&self) -> bool {
        self.require_session
    }

    pub async fn request_generation(
        &self,
        session: Option<&Session>,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        if let Err(e) = authorize(session, self.require_session) {
            warn!("Rejected generation request without a session");
            return Err(e);
        }

        let options = GenerationOptions::try_from(request)?;
        info!(
            user = session.map(|s| s.user.as_str()).unwrap_or("anonymous"),
            quality = %options.quality,
            style = %options.style,
            size = %options.size,
            prompt_chars = options.prompt.chars().count(),
            "Requesting image generation"
        );

        match self.provider.generate(&options).await {
            Ok(locator) => {
                info!("Image generated");
                Ok(locator)
            }
            Err(e) => {
                warn!(status = e.status(), error = %e, "Image generation failed");
                Err(e)
            }
        }
    }
}
