//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"AI " <span class="animated-gradient-text">"Artistry Studio"</span></h1>
        </header>
    }
}
