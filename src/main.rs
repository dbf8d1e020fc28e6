use anyhow::Context;
use artistry_common::{GalleryStore, GenerationRequest};
use artistry_studio::{cli, config, gateway, provider, server, session, storage, studio};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let default_filter = if cli.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Serve { port, require_session } => {
            let mut config = config.with_env_overrides();
            if let Some(port) = port {
                config.port = port;
            }
            if require_session {
                config.require_session = true;
            }
            if config.require_session && config.sessions.is_empty() {
                eprintln!("⚠ セッションが登録されていません。`config --add-session USER` で発行してください");
            }

            let state = server::AppState::from_config(&config)?;
            let address = format!("0.0.0.0:{}", config.port);
            let listener = tokio::net::TcpListener::bind(&address)
                .await
                .with_context(|| format!("bind {}", address))?;

            server::serve(listener, state).await?;
        }

        Commands::Generate { prompt, quality, style, size } => {
            println!("🎨 artistry-studio - 画像生成\n");

            let provider = provider::OpenAiProvider::from_config(&config)?;
            let gateway = gateway::Gateway::new(Arc::new(provider), false);
            let mut gallery = GalleryStore::hydrate(storage::JsonFileStorage::new(Config::gallery_path()?));

            let request = GenerationRequest::new(prompt).with_options(quality, style, size);

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.set_message("生成中...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = studio::submit(&gateway, None, &request, &mut gallery).await;
            spinner.finish_and_clear();

            match outcome? {
                studio::SubmitOutcome::Saved { locator } => {
                    println!("✔ 生成完了: {}", locator);
                    println!("✔ ギャラリーに保存 ({}枚)", gallery.len());
                }
                studio::SubmitOutcome::NotSaved { locator, error } => {
                    println!("✔ 生成完了: {}", locator);
                    eprintln!("✖ ギャラリーへの保存に失敗: {}", error);
                }
            }
        }

        Commands::Gallery { remove, clear, yes } => {
            let gallery_path = Config::gallery_path()?;
            let mut gallery = GalleryStore::hydrate(storage::JsonFileStorage::new(&gallery_path));

            if let Some(locator) = remove {
                if gallery.contains(&locator) {
                    gallery.remove(&locator)?;
                    println!("✔ 削除しました: {}", locator);
                } else {
                    println!("ギャラリーにありません: {}", locator);
                }
            }

            if clear {
                let confirmed = yes
                    || Confirm::new()
                        .with_prompt("ギャラリーの画像を全て削除します。よろしいですか？")
                        .default(false)
                        .interact()?;
                if confirmed {
                    gallery.clear()?;
                    println!("✔ ギャラリーを空にしました");
                }
            }

            println!("ギャラリー: {} ({}枚)", gallery_path.display(), gallery.len());
            for (index, item) in gallery.items().iter().enumerate() {
                println!("  {:>3}. {}", index + 1, item.locator);
            }
        }

        Commands::Config { set_api_key, show, add_session, ttl_hours } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(user) = add_session {
                let (token, entry) = session::mint_session(&user, ttl_hours)?;
                config.sessions.push(entry);
                config.save()?;
                println!("✔ セッションを発行しました: {}", user);
                println!("  トークン（再表示できません）: {}", token);
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  API URL: {}", config.api_base_url);
                println!("  ポート: {}", config.port);
                println!("  セッション必須: {}", if config.require_session { "はい" } else { "いいえ" });
                println!("  セッション数: {}", config.sessions.len());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
