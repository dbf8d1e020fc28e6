//! セッション（認証）
//!
//! 認証プロバイダの中身は扱わない。ベアラートークンをセッションに解決する
//! `SessionProvider` と、生成を許可するかの判定 `authorize` だけを持つ。

use crate::error::StudioError;
use artistry_common::GenerationError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 有効なセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 設定ファイルに保存するセッション
///
/// トークン本体は保存せず、SHA-256のハッシュだけを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub token_sha256: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// トークンからセッションを得る
pub trait SessionProvider: Send + Sync {
    fn get_session(&self, token: &str) -> Option<Session>;
}

/// 設定ファイルのセッション一覧
#[derive(Debug, Clone, Default)]
pub struct ConfiguredSessions {
    entries: Vec<SessionEntry>,
}

impl ConfiguredSessions {
    pub fn new(entries: Vec<SessionEntry>) -> Self {
        Self { entries }
    }

    pub fn get_session_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
        let digest = hash_token(token);
        self.entries
            .iter()
            .find(|entry| entry.token_sha256 == digest)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| Session {
                user: entry.user.clone(),
                expires_at: entry.expires_at,
            })
    }
}

impl SessionProvider for ConfiguredSessions {
    fn get_session(&self, token: &str) -> Option<Session> {
        self.get_session_at(token, Utc::now())
    }
}

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// 新しいトークンを発行する（戻り値のトークンは一度だけ表示する）
pub fn mint_session(user: &str, ttl_hours: Option<i64>) -> crate::error::Result<(String, SessionEntry)> {
    let now = Utc::now();
    let expires_at = match ttl_hours {
        Some(hours) => Some(expiry_after(now, hours)?),
        None => None,
    };

    let token = uuid::Uuid::new_v4().simple().to_string();
    let entry = SessionEntry {
        token_sha256: hash_token(&token),
        user: user.to_string(),
        created_at: now,
        expires_at,
    };
    Ok((token, entry))
}

fn expiry_after(now: DateTime<Utc>, hours: i64) -> crate::error::Result<DateTime<Utc>> {
    if hours <= 0 {
        return Err(StudioError::Config(format!(
            "有効期間は1時間以上を指定してください: {}",
            hours
        )));
    }

    Duration::try_hours(hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| StudioError::Config(format!("有効期間が大きすぎます: {}時間", hours)))
}

/// `Authorization: Bearer <token>` からトークンを取り出す
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 生成を許可するか
pub fn authorize(session: Option<&Session>, require_session: bool) -> Result<(), GenerationError> {
    if require_session && session.is_none() {
        return Err(GenerationError::Unauthorized);
    }
    Ok(())
}
