//! ギャラリーコンポーネント

use artistry_common::image_placeholder;
use leptos::prelude::*;

/// ダウンロード時のファイル名
pub fn download_file_name(index: usize) -> String {
    format!("generated-image-{}.jpg", index)
}

fn confirm_delete_all() -> bool {
    web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(
                "Are you absolutely sure? This will permanently delete all your generated images.",
            )
            .ok()
        })
        .unwrap_or(false)
}

#[component]
pub fn GalleryGrid<FD, FA>(
    images: Memo<Vec<String>>,
    on_delete: FD,
    on_delete_all: FA,
) -> impl IntoView
where
    FD: Fn(String) + 'static + Clone + Send + Sync,
    FA: Fn(()) + 'static + Clone + Send + Sync,
{
    let placeholder = format!("background-image: url('{}')", image_placeholder(512, 512));

    view! {
        <div class="card">
            <div class="gallery-header">
                <h2>"Your Masterpiece Collection"</h2>
                <Show when=move || !images.with(|i| i.is_empty())>
                    <button
                        class="btn btn-destructive"
                        on:click={
                            let on_delete_all = on_delete_all.clone();
                            move |_| {
                                if confirm_delete_all() {
                                    on_delete_all(());
                                }
                            }
                        }
                    >
                        "🗑 Delete All"
                    </button>
                </Show>
            </div>

            <Show
                when=move || !images.with(|i| i.is_empty())
                fallback=|| view! {
                    <div class="gallery-empty">
                        <div class="gallery-empty-icon">"🖼"</div>
                        <p class="gallery-empty-title">"Your Gallery Awaits"</p>
                        <p class="text-muted">"Create your first masterpiece and watch your collection grow"</p>
                    </div>
                }
            >
                <div class="gallery-grid">
                    <For
                        each=move || images.get().into_iter().enumerate()
                        key=|(index, url)| format!("{}-{}", index, url)
                        children={
                            let on_delete = on_delete.clone();
                            let placeholder = placeholder.clone();
                            move |(index, url)| {
                                let on_delete = on_delete.clone();
                                let delete_url = url.clone();
                                view! {
                                    <div class="gallery-card">
                                        <div class="image-frame" style=placeholder.clone()>
                                            <img src=url.clone() alt="Generated Image" loading="lazy" />
                                        </div>
                                        <div class="gallery-card-footer">
                                            <a
                                                class="btn btn-outline"
                                                href=url
                                                download=download_file_name(index)
                                                target="_blank"
                                                rel="noopener noreferrer"
                                            >
                                                "⬇ Download"
                                            </a>
                                            <button
                                                class="btn btn-ghost text-danger"
                                                on:click=move |_| on_delete(delete_url.clone())
                                            >
                                                "🗑 Delete"
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
