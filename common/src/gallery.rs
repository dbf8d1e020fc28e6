//! ギャラリーストア
//!
//! 生成画像のロケータ（URL）を新しい順に保持し、永続ストレージと常に一致させる。
//!
//! - 読み込み（hydrate）は失敗しない。未保存・破損は空として扱う。
//! - 変更操作は全体を書き込んでから状態を更新する。書き込みに失敗したら
//!   状態は呼び出し前のまま。
//! - 同じロケータの再追加は先頭への移動になる（重複は作らない）。
//!
//! 複数タブ間の排他はしない。同じストレージを別タブが書き換えた場合は
//! 最後の書き込みが残る。

use crate::error::{Error, Result};
use crate::storage::KeyValueStorage;
use serde::{Deserialize, Serialize};

/// 保存キー
pub const GALLERY_STORAGE_KEY: &str = "generatedImages";

/// ギャラリーの1枚
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference {
    pub locator: String,
}

impl ImageReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self { locator: locator.into() }
    }
}

/// ギャラリー全体（新しい順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryState {
    pub items: Vec<ImageReference>,
}

impl GalleryState {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, locator: &str) -> bool {
        self.items.iter().any(|item| item.locator == locator)
    }

    pub fn locators(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.locator.as_str()).collect()
    }

    /// 保存形式からの復元
    ///
    /// 空文字と重複は捨てる（先に出たもの＝新しい方を残す）。
    /// 捨てたものがあれば `true` を返す。
    fn from_stored(raw: &str) -> Option<(Self, bool)> {
        let locators: Vec<String> = serde_json::from_str(raw).ok()?;
        let stored = locators.len();
        let mut state = Self::default();
        for locator in locators {
            if locator.trim().is_empty() || state.contains(&locator) {
                continue;
            }
            state.items.push(ImageReference::new(locator));
        }
        let dropped = state.items.len() != stored;
        Some((state, dropped))
    }
}

/// ギャラリーストア
#[derive(Debug, Clone)]
pub struct GalleryStore<S> {
    storage: S,
    state: GalleryState,
}

impl<S: KeyValueStorage> GalleryStore<S> {
    /// ストレージから読み込む
    ///
    /// 古いデータを整理した場合はその内容を書き戻す（失敗しても読み込みは続ける）。
    pub fn hydrate(mut storage: S) -> Self {
        let (state, dropped) = match storage.get(GALLERY_STORAGE_KEY) {
            Ok(Some(raw)) => GalleryState::from_stored(&raw).unwrap_or_default(),
            Ok(None) | Err(_) => (GalleryState::default(), false),
        };

        if dropped {
            if let Ok(serialized) = serde_json::to_string(&state) {
                let _ = storage.set(GALLERY_STORAGE_KEY, &serialized);
            }
        }

        Self { storage, state }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn items(&self) -> &[ImageReference] {
        &self.state.items
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn contains(&self, locator: &str) -> bool {
        self.state.contains(locator)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// 先頭に追加（既存なら先頭へ移動）
    pub fn add(&mut self, locator: impl Into<String>) -> Result<&GalleryState> {
        let locator = locator.into();
        if locator.trim().is_empty() {
            return Err(Error::InvalidLocator(locator));
        }

        let mut next = Vec::with_capacity(self.state.len() + 1);
        next.push(ImageReference::new(locator.clone()));
        next.extend(
            self.state
                .items
                .iter()
                .filter(|item| item.locator != locator)
                .cloned(),
        );

        self.commit(GalleryState { items: next })
    }

    /// 削除（見つからなければ何もしない）
    pub fn remove(&mut self, locator: &str) -> Result<&GalleryState> {
        if !self.state.contains(locator) {
            return Ok(&self.state);
        }

        let next = self
            .state
            .items
            .iter()
            .filter(|item| item.locator != locator)
            .cloned()
            .collect();

        self.commit(GalleryState { items: next })
    }

    /// 全削除
    pub fn clear(&mut self) -> Result<&GalleryState> {
        self.commit(GalleryState::default())
    }

    /// 書き込みが成功したときだけ状態を差し替える
    fn commit(&mut self, next: GalleryState) -> Result<&GalleryState> {
        let serialized = serde_json::to_string(&next)
            .map_err(|e| Error::Persistence(e.to_string()))?;

        self.storage
            .set(GALLERY_STORAGE_KEY, &serialized)
            .map_err(|e| match e {
                Error::Persistence(msg) | Error::Storage(msg) => Error::Persistence(msg),
                other => Error::Persistence(other.to_string()),
            })?;

        self.state = next;
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn locators<S: KeyValueStorage>(store: &GalleryStore<S>) -> Vec<&str> {
        store.state().locators()
    }

    #[test]
    fn test_hydrate_absent_is_empty() {
        let store = GalleryStore::hydrate(MemoryStorage::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydrate_corrupt_is_empty() {
        for raw in ["{ invalid json }", "\"just a string\"", "[1, 2, 3]", "{\"a\":1}"] {
            let store = GalleryStore::hydrate(MemoryStorage::with_entry(GALLERY_STORAGE_KEY, raw));
            assert!(store.is_empty(), "破損データが空にならない: {}", raw);
        }
    }

    #[test]
    fn test_hydrate_keeps_stored_order() {
        let raw = r#"["https://example/c","https://example/b","https://example/a"]"#;
        let store = GalleryStore::hydrate(MemoryStorage::with_entry(GALLERY_STORAGE_KEY, raw));
        assert_eq!(
            locators(&store),
            vec!["https://example/c", "https://example/b", "https://example/a"]
        );
    }

    #[test]
    fn test_hydrate_drops_legacy_duplicates() {
        let raw = r#"["https://example/b","https://example/a","https://example/b",""]"#;
        let store = GalleryStore::hydrate(MemoryStorage::with_entry(GALLERY_STORAGE_KEY, raw));
        assert_eq!(locators(&store), vec!["https://example/b", "https://example/a"]);
        assert_eq!(
            store.storage().raw(GALLERY_STORAGE_KEY),
            Some(r#"["https://example/b","https://example/a"]"#)
        );
    }

    #[test]
    fn test_hydrate_clean_data_does_not_write() {
        let raw = r#"["https://example/b","https://example/a"]"#;
        let store = GalleryStore::hydrate(MemoryStorage::with_entry(GALLERY_STORAGE_KEY, raw));
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_hydrate_cleanup_write_failure_still_loads() {
        let mut storage = MemoryStorage::with_entry(GALLERY_STORAGE_KEY, r#"["a","a"]"#);
        storage.set_fail_writes(true);

        let store = GalleryStore::hydrate(storage);
        assert_eq!(locators(&store), vec!["a"]);
        assert_eq!(store.storage().raw(GALLERY_STORAGE_KEY), Some(r#"["a","a"]"#));
    }

    #[test]
    fn test_add_is_newest_first() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();
        assert_eq!(locators(&store), vec!["b", "a"]);
    }

    #[test]
    fn test_add_writes_full_sequence() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();
        assert_eq!(store.storage().raw(GALLERY_STORAGE_KEY), Some(r#"["b","a"]"#));
    }

    #[test]
    fn test_add_existing_moves_to_front() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();

        let state = store.add("a").unwrap();
        assert_eq!(state.locators(), vec!["a", "c", "b"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_empty_locator_rejected() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        let err = store.add("  ").unwrap_err();
        assert!(matches!(err, Error::InvalidLocator(_)));
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_add_rolls_back_on_write_failure() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        let before = store.state().clone();

        let mut storage = store.into_storage();
        storage.set_fail_writes(true);
        let mut store = GalleryStore::hydrate(storage);

        let err = store.add("b").unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert_eq!(store.state(), &before);
        assert_eq!(store.storage().raw(GALLERY_STORAGE_KEY), Some(r#"["a"]"#));
    }

    #[test]
    fn test_remove_existing() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();

        let state = store.remove("a").unwrap();
        assert_eq!(state.locators(), vec!["b"]);
        assert_eq!(store.storage().raw(GALLERY_STORAGE_KEY), Some(r#"["b"]"#));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();
        let writes = store.storage().writes();

        let state = store.remove("zzz").unwrap().clone();
        assert_eq!(state.locators(), vec!["a"]);
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn test_remove_rolls_back_on_write_failure() {
        let mut storage = MemoryStorage::with_entry(GALLERY_STORAGE_KEY, r#"["b","a"]"#);
        storage.set_fail_writes(true);
        let mut store = GalleryStore::hydrate(storage);

        assert!(store.remove("a").is_err());
        assert_eq!(locators(&store), vec!["b", "a"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = GalleryStore::hydrate(MemoryStorage::new());
        store.add("a").unwrap();

        assert!(store.clear().unwrap().is_empty());
        assert!(store.clear().unwrap().is_empty());
        assert_eq!(store.storage().raw(GALLERY_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_clear_rolls_back_on_write_failure() {
        let mut storage = MemoryStorage::with_entry(GALLERY_STORAGE_KEY, r#"["a"]"#);
        storage.set_fail_writes(true);
        let mut store = GalleryStore::hydrate(storage);

        assert!(store.clear().is_err());
        assert_eq!(locators(&store), vec!["a"]);
    }

    #[test]
    fn test_round_trip_after_mixed_operations() {
        let mut storage = MemoryStorage::new();
        let expected = {
            let mut store = GalleryStore::hydrate(&mut storage);
            store.add("one").unwrap();
            store.add("two").unwrap();
            store.add("three").unwrap();
            store.remove("two").unwrap();
            store.add("one").unwrap();
            store.add("four").unwrap();
            store.state().clone()
        };

        let rehydrated = GalleryStore::hydrate(storage);
        assert_eq!(rehydrated.state(), &expected);
        assert_eq!(rehydrated.state().locators(), vec!["four", "one", "three"]);
    }
}
