//! メインアプリケーションコンポーネント

use crate::api;
use crate::browser_storage::{load_session_token, save_session_token, BrowserStorage};
use crate::components::{
    gallery_grid::GalleryGrid, header::Header, prompt_form::PromptForm,
    settings_panel::SettingsPanel,
};
use artistry_common::{GalleryStore, GenerationError, GenerationRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// タブ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Create,
    Gallery,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Create => "Create Masterpiece",
            Tab::Gallery => "Your Gallery",
        }
    }
}

/// 生成エラーの表示文
pub fn generation_error_message(err: &GenerationError) -> String {
    match err {
        GenerationError::Unauthorized => {
            "Please sign in to generate images: enter your session token in the settings above."
                .to_string()
        }
        other => other.to_string(),
    }
}

/// ギャラリー保存エラーの表示文（生成の失敗とは別に扱う）
pub fn persistence_error_message(err: &artistry_common::Error) -> String {
    format!(
        "Your image was generated, but it could not be saved to your gallery. {}",
        err
    )
}

#[component]
pub fn App() -> impl IntoView {
    let gallery = RwSignal::new(GalleryStore::hydrate(BrowserStorage));
    let (active_tab, set_active_tab) = signal(Tab::Create);
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (session_token, set_session_token) = signal(load_session_token());

    Effect::new(move |_| save_session_token(&session_token.get()));

    let images = Memo::new(move |_| {
        gallery.with(|g| {
            g.items()
                .iter()
                .map(|item| item.locator.clone())
                .collect::<Vec<_>>()
        })
    });

    // 生成ハンドラ（完了までボタンは無効）
    let on_generate = move |request: GenerationRequest| {
        set_is_loading.set(true);
        set_error.set(None);
        let token = session_token.get_untracked();

        spawn_local(async move {
            let token = (!token.is_empty()).then_some(token);
            match api::request_generation(&request, token.as_deref()).await {
                Ok(locator) => {
                    let mut store = gallery.get_untracked();
                    match store.add(locator) {
                        Ok(_) => {
                            gallery.set(store);
                            set_active_tab.set(Tab::Gallery);
                        }
                        Err(e) => set_error.set(Some(persistence_error_message(&e))),
                    }
                }
                Err(e) => set_error.set(Some(generation_error_message(&e))),
            }
            set_is_loading.set(false);
        });
    };

    let on_delete = move |locator: String| {
        let mut store = gallery.get_untracked();
        match store.remove(&locator) {
            Ok(_) => gallery.set(store),
            Err(e) => {
                gloo::console::error!(format!("failed to delete image: {}", e));
                set_error.set(Some(format!("Could not update your gallery. {}", e)));
            }
        }
    };

    let on_delete_all = move |_: ()| {
        let mut store = gallery.get_untracked();
        match store.clear() {
            Ok(_) => gallery.set(store),
            Err(e) => {
                gloo::console::error!(format!("failed to clear gallery: {}", e));
                set_error.set(Some(format!("Could not update your gallery. {}", e)));
            }
        }
    };

    let tab_button = move |tab: Tab| {
        view! {
            <button
                class=move || if active_tab.get() == tab { "tab-trigger active" } else { "tab-trigger" }
                on:click=move |_| set_active_tab.set(tab)
            >
                {tab.label()}
            </button>
        }
    };

    view! {
        <main class="container">
            <Header />

            <SettingsPanel session_token=session_token set_session_token=set_session_token />

            <div class="tabs-list">
                {tab_button(Tab::Create)}
                {tab_button(Tab::Gallery)}
            </div>

            <Show
                when=move || active_tab.get() == Tab::Create
                fallback=move || view! {
                    <GalleryGrid images=images on_delete=on_delete on_delete_all=on_delete_all />
                }
            >
                <PromptForm is_loading=is_loading error=error on_generate=on_generate />
            </Show>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_prompts_sign_in() {
        let message = generation_error_message(&GenerationError::Unauthorized);
        assert!(message.contains("sign in"));
    }

    #[test]
    fn test_provider_message_shown_verbatim() {
        let err = GenerationError::Provider {
            status: 400,
            message: "Billing hard limit has been reached".into(),
        };
        assert_eq!(generation_error_message(&err), "Billing hard limit has been reached");
    }

    #[test]
    fn test_transport_message() {
        let err = GenerationError::Transport(artistry_common::TRANSPORT_ERROR_MESSAGE.into());
        assert_eq!(generation_error_message(&err), "Unknown error!");
    }

    #[test]
    fn test_persistence_message_is_distinct() {
        let err = artistry_common::Error::Persistence("QuotaExceededError".into());
        let message = persistence_error_message(&err);
        assert!(message.contains("generated"));
        assert!(message.contains("could not be saved"));
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(Tab::Create.label(), "Create Masterpiece");
        assert_eq!(Tab::Gallery.label(), "Your Gallery");
    }
}
