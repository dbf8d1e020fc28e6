//! 設定パネル（セッショントークン）

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(
    session_token: ReadSignal<String>,
    set_session_token: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="session-token">"Session token"</label>
                <input
                    type="password"
                    id="session-token"
                    placeholder="Required when this studio asks you to sign in"
                    prop:value=move || session_token.get()
                    on:input=move |ev| {
                        set_session_token.set(event_target_value(&ev).trim().to_string());
                    }
                />
            </div>
        </div>
    }
}
