//! 生成 → ギャラリー追加の流れ
//!
//! 生成の失敗とギャラリー保存の失敗は別物として返す。

use crate::gateway::Gateway;
use crate::session::Session;
use artistry_common::{GalleryStore, GenerationError, GenerationRequest, KeyValueStorage};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// 生成してギャラリーに保存した
    Saved { locator: String },
    /// 生成は成功したが保存に失敗した（ギャラリーは変わっていない）
    NotSaved {
        locator: String,
        error: artistry_common::Error,
    },
}

impl SubmitOutcome {
    pub fn locator(&self) -> &str {
        match self {
            SubmitOutcome::Saved { locator } | SubmitOutcome::NotSaved { locator, .. } => locator,
        }
    }
}

pub async fn submit<S: KeyValueStorage>(
    gateway: &Gateway,
    session: Option<&Session>,
    request: &GenerationRequest,
    gallery: &mut GalleryStore<S>,
) -> Result<SubmitOutcome, GenerationError> {
    let locator = gateway.request_generation(session, request).await?;

    Ok(match gallery.add(locator.clone()) {
        Ok(_) => SubmitOutcome::Saved { locator },
        Err(error) => SubmitOutcome::NotSaved { locator, error },
    })
}
