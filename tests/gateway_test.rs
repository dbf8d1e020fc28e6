//! ゲートウェイのテスト
//!
//! セッション判定・パラメータの既定値・プロバイダ呼び出し回数・
//! 生成からギャラリー保存までの流れを検証

mod support;

use artistry_common::{
    GalleryStore, GenerationError, GenerationRequest, ImageSize, MemoryStorage, Quality, Style,
    GALLERY_STORAGE_KEY, MAX_PROMPT_CHARS,
};
use artistry_studio::gateway::Gateway;
use artistry_studio::session::Session;
use artistry_studio::studio::{submit, SubmitOutcome};
use std::sync::Arc;
use support::MockProvider;

fn alice() -> Session {
    Session {
        user: "alice".into(),
        expires_at: None,
    }
}

/// セッション必須でセッションなし → 認証エラー、プロバイダは呼ばれない
#[tokio::test]
async fn test_authorization_gate_skips_provider() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider.clone(), true);

    let result = gateway
        .request_generation(None, &GenerationRequest::new("a red fox in snow"))
        .await;

    assert_eq!(result, Err(GenerationError::Unauthorized));
    assert_eq!(provider.calls(), 0);
}

/// セッション必須でセッションあり → 生成される
#[tokio::test]
async fn test_authorized_session_generates() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider.clone(), true);

    let locator = gateway
        .request_generation(Some(&alice()), &GenerationRequest::new("a red fox in snow"))
        .await
        .unwrap();

    assert_eq!(locator, "https://example/img1");
    assert_eq!(provider.calls(), 1);
}

/// オプション未指定ならデフォルトで依頼する
#[tokio::test]
async fn test_defaults_forwarded_to_provider() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider.clone(), false);

    gateway
        .request_generation(None, &GenerationRequest::new("a red fox in snow"))
        .await
        .unwrap();

    let options = provider.last_options().expect("プロバイダが呼ばれていない");
    assert_eq!(options.quality, Quality::Hd);
    assert_eq!(options.style, Style::Vivid);
    assert_eq!(options.size, ImageSize::Square);
}

/// 長すぎるプロンプトは切り詰めて送る（拒否しない）
#[tokio::test]
async fn test_long_prompt_truncated() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider.clone(), false);

    let prompt = "z".repeat(MAX_PROMPT_CHARS * 2);
    gateway
        .request_generation(None, &GenerationRequest::new(prompt))
        .await
        .unwrap();

    let options = provider.last_options().unwrap();
    assert_eq!(options.prompt.chars().count(), MAX_PROMPT_CHARS);
}

/// 不正なオプションはプロバイダに送らない
#[tokio::test]
async fn test_invalid_option_rejected_before_provider() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider.clone(), false);

    let request = GenerationRequest {
        prompt: "fox".into(),
        quality: Some("ultra".into()),
        ..Default::default()
    };
    let err = gateway.request_generation(None, &request).await.unwrap_err();

    assert_eq!(err.status(), 400);
    assert_eq!(provider.calls(), 0);
}

/// プロバイダのエラーはステータスとメッセージをそのまま返す（リトライなし）
#[tokio::test]
async fn test_provider_error_propagated_once() {
    let provider = Arc::new(MockProvider::failing(GenerationError::Provider {
        status: 400,
        message: "Your request was rejected as a result of our safety system.".into(),
    }));
    let gateway = Gateway::new(provider.clone(), false);

    let err = gateway
        .request_generation(None, &GenerationRequest::new("fox"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 400);
    assert!(err.to_string().contains("safety system"));
    assert_eq!(provider.calls(), 1);
}

/// 生成 → ギャラリー保存 → 永続化まで
#[tokio::test]
async fn test_end_to_end_generation_into_gallery() {
    let provider = Arc::new(MockProvider::returning("https://example/img1"));
    let gateway = Gateway::new(provider, false);
    let mut gallery = GalleryStore::hydrate(MemoryStorage::new());

    let outcome = submit(&gateway, None, &GenerationRequest::new("a red fox in snow"), &mut gallery)
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
    assert_eq!(gallery.state().locators(), vec!["https://example/img1"]);
    assert_eq!(
        gallery.storage().raw(GALLERY_STORAGE_KEY),
        Some(r#"["https://example/img1"]"#)
    );
}

/// 生成は成功したが保存に失敗 → 保存失敗として区別し、ギャラリーは変わらない
#[tokio::test]
async fn test_persistence_failure_is_distinct() {
    let provider = Arc::new(MockProvider::returning("https://example/img2"));
    let gateway = Gateway::new(provider, false);

    let mut storage = MemoryStorage::with_entry(GALLERY_STORAGE_KEY, r#"["https://example/img1"]"#);
    storage.set_fail_writes(true);
    let mut gallery = GalleryStore::hydrate(storage);

    let outcome = submit(&gateway, None, &GenerationRequest::new("fox"), &mut gallery)
        .await
        .expect("生成自体は成功するはず");

    match outcome {
        SubmitOutcome::NotSaved { locator, error } => {
            assert_eq!(locator, "https://example/img2");
            assert!(matches!(error, artistry_common::Error::Persistence(_)));
        }
        other => panic!("保存失敗になっていない: {:?}", other),
    }
    assert_eq!(gallery.state().locators(), vec!["https://example/img1"]);
}

/// 生成失敗ならギャラリーに触らない
#[tokio::test]
async fn test_generation_failure_leaves_gallery() {
    let provider = Arc::new(MockProvider::failing(GenerationError::Transport("timeout".into())));
    let gateway = Gateway::new(provider, false);
    let mut gallery = GalleryStore::hydrate(MemoryStorage::new());

    let err = submit(&gateway, None, &GenerationRequest::new("fox"), &mut gallery)
        .await
        .unwrap_err();

    assert_eq!(err.status(), 500);
    assert!(gallery.is_empty());
    assert_eq!(gallery.storage().writes(), 0);
}
