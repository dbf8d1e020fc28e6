use crate::error::{Result, StudioError};
use crate::session::SessionEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const PORT_ENV: &str = "STUDIO_PORT";
const REQUIRE_SESSION_ENV: &str = "STUDIO_REQUIRE_SESSION";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub port: u16,
    pub require_session: bool,
    pub timeout_seconds: u64,
    pub sessions: Vec<SessionEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "dall-e-3".into(),
            api_base_url: "https://api.openai.com".into(),
            port: 3000,
            require_session: false,
            timeout_seconds: 120,
            sessions: Vec::new(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// 環境変数での上書きは含まない（保存すると上書き値がファイルに残るため）。
    /// サーバー起動時は `with_env_overrides` を通す。
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StudioError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("artistry-studio"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// ギャラリーの保存先
    pub fn gallery_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("gallery.json"))
    }

    /// `STUDIO_PORT` / `STUDIO_REQUIRE_SESSION` を反映した実行時の設定
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => eprintln!("{} が不正です: {}", PORT_ENV, port),
            }
        }

        if let Some(flag) = lookup(REQUIRE_SESSION_ENV) {
            self.require_session = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(StudioError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
