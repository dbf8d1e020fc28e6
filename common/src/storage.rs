//! 永続ストレージの抽象化
//!
//! ギャラリーはキー/値ストレージ（ブラウザのlocalStorage、設定フォルダの
//! JSONファイル、テスト用のメモリ）に文字列で保存される。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// キー/値ストレージ
pub trait KeyValueStorage {
    /// キーの値を読む（未保存ならNone）
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// キーの値を丸ごと上書きする
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// メモリ上のストレージ
///
/// `fail_writes` を立てると書き込みが失敗する（容量超過・無効化の再現用）。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値付きで作成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// 成功した書き込み回数
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage("quota exceeded".into()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
