//! テスト用のプロバイダとサーバー起動

#![allow(dead_code)]

use artistry_common::{GenerationError, GenerationOptions};
use artistry_studio::provider::ImageProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 呼び出し回数と受け取ったパラメータを記録するプロバイダ
pub struct MockProvider {
    result: Result<String, GenerationError>,
    calls: AtomicUsize,
    last_options: Mutex<Option<GenerationOptions>>,
}

impl MockProvider {
    pub fn returning(locator: &str) -> Self {
        Self::with_result(Ok(locator.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<String, GenerationError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<GenerationOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn generate(&self, options: &GenerationOptions) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options.clone());
        self.result.clone()
    }
}

/// ルーターをランダムポートで起動してベースURLを返す
pub async fn spawn_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}
