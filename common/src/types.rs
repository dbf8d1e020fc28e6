//! 画像生成リクエスト/レスポンスの型定義
//!
//! サーバー（ゲートウェイ）とWeb(WASM)で共有される型:
//! - GenerationRequest: エンドポイントが受け取るJSON
//! - GenerationOptions: デフォルト適用・検証済みのパラメータ
//! - GenerationResponse / ErrorResponse: エンドポイントの応答

use crate::error::GenerationError;
use crate::prompt::normalize_prompt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 画質
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Hd,
    Standard,
}

/// スタイル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Vivid,
    Natural,
}

/// 画像サイズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    Portrait,
}

impl Quality {
    pub const ALL: [Quality; 2] = [Quality::Hd, Quality::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Hd => "hd",
            Quality::Standard => "standard",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Hd => "HD",
            Quality::Standard => "Standard",
        }
    }
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Vivid, Style::Natural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Vivid => "vivid",
            Style::Natural => "natural",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Style::Vivid => "Vivid",
            Style::Natural => "Natural",
        }
    }
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Square, ImageSize::Landscape, ImageSize::Portrait];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1792x1024",
            ImageSize::Portrait => "1024x1792",
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hd" => Ok(Quality::Hd),
            "standard" => Ok(Quality::Standard),
            _ => Err(format!("Unknown quality: {}. Use hd or standard", s)),
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vivid" => Ok(Style::Vivid),
            "natural" => Ok(Style::Natural),
            _ => Err(format!("Unknown style: {}. Use vivid or natural", s)),
        }
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1024x1024" => Ok(ImageSize::Square),
            "1792x1024" => Ok(ImageSize::Landscape),
            "1024x1792" => Ok(ImageSize::Portrait),
            _ => Err(format!(
                "Unknown size: {}. Use 1024x1024, 1792x1024 or 1024x1792",
                s
            )),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// エンドポイントのリクエストボディ
///
/// オプションは未指定・空文字ならデフォルトになるため文字列のまま受ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, quality: Quality, style: Style, size: ImageSize) -> Self {
        self.quality = Some(quality.to_string());
        self.style = Some(style.to_string());
        self.size = Some(size.to_string());
        self
    }
}

/// 検証済みの生成パラメータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    pub prompt: String,
    pub quality: Quality,
    pub style: Style,
    pub size: ImageSize,
}

fn parse_option<T>(value: Option<&str>) -> Result<T, GenerationError>
where
    T: FromStr<Err = String> + Default,
{
    match value.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(v) => v.parse().map_err(GenerationError::InvalidRequest),
    }
}

impl TryFrom<&GenerationRequest> for GenerationOptions {
    type Error = GenerationError;

    fn try_from(request: &GenerationRequest) -> Result<Self, Self::Error> {
        let prompt = normalize_prompt(&request.prompt)
            .ok_or_else(|| GenerationError::InvalidRequest("Prompt must not be empty".into()))?;

        Ok(Self {
            prompt,
            quality: parse_option(request.quality.as_deref())?,
            style: parse_option(request.style.as_deref())?,
            size: parse_option(request.size.as_deref())?,
        })
    }
}

/// 成功レスポンス `{ "image": locator }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub image: String,
}

/// 失敗レスポンス `{ "error": message }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
