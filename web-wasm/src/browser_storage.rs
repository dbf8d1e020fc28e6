//! ブラウザのlocalStorage

use artistry_common::{Error, KeyValueStorage, Result};
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

const SESSION_TOKEN_KEY: &str = "sessionToken";

/// `window.localStorage` をギャラリーの保存先にする
///
/// 利用できない（無効化・プライベートモード等）場合は書き込みエラーになる。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| Error::Storage("window is not available".into()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| Error::Storage("localStorage is disabled".into()))
}

fn js_error(value: JsValue) -> Error {
    Error::Storage(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // 容量超過はQuotaExceededErrorとして返る
        local_storage()?.set_item(key, value).map_err(js_error)
    }
}

pub fn load_session_token() -> String {
    LocalStorage::get(SESSION_TOKEN_KEY).unwrap_or_default()
}

pub fn save_session_token(token: &str) {
    if token.is_empty() {
        LocalStorage::delete(SESSION_TOKEN_KEY);
    } else if let Err(e) = LocalStorage::set(SESSION_TOKEN_KEY, token) {
        gloo::console::warn!(format!("セッショントークンを保存できません: {}", e));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use artistry_common::{GalleryStore, GALLERY_STORAGE_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_gallery_round_trip_in_local_storage() {
        let mut store = GalleryStore::hydrate(BrowserStorage);
        store.clear().unwrap();
        store.add("https://example/a").unwrap();
        store.add("https://example/b").unwrap();

        let reloaded = GalleryStore::hydrate(BrowserStorage);
        assert_eq!(
            reloaded.state().locators(),
            vec!["https://example/b", "https://example/a"]
        );
        assert_eq!(
            BrowserStorage.get(GALLERY_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["https://example/b","https://example/a"]"#)
        );
    }

    #[wasm_bindgen_test]
    fn test_corrupt_local_storage_is_empty() {
        let mut storage = BrowserStorage;
        storage.set(GALLERY_STORAGE_KEY, "not json").unwrap();
        assert!(GalleryStore::hydrate(BrowserStorage).is_empty());
    }
}
