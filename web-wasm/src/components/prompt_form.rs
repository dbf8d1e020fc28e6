//! プロンプト入力フォーム

use crate::api::read_clipboard_text;
use artistry_common::{
    prompt_char_count, truncate_prompt, GenerationRequest, ImageSize, Quality, Style,
    MAX_PROMPT_CHARS,
};
use leptos::ev::SubmitEvent;
use leptos::html::Textarea;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 選択範囲（UTF-16オフセット）を `text` で置き換える
///
/// 戻り値は (新しい値, 挿入後のカーソル位置)。結果は最大文字数で切り詰める。
pub fn insert_at_utf16(value: &str, start: u32, end: u32, text: &str) -> (String, u32) {
    let to_byte = |offset: u32| {
        let mut units = 0u32;
        for (idx, ch) in value.char_indices() {
            if units >= offset {
                return idx;
            }
            units += ch.len_utf16() as u32;
        }
        value.len()
    };

    let (start, end) = (start.min(end), start.max(end));
    let (start_byte, end_byte) = (to_byte(start), to_byte(end));

    let mut next = String::with_capacity(value.len() + text.len());
    next.push_str(&value[..start_byte]);
    next.push_str(text);
    let cursor_byte = next.len();
    next.push_str(&value[end_byte..]);

    let truncated = truncate_prompt(&next);
    let cursor: u32 = truncated[..cursor_byte.min(truncated.len())]
        .chars()
        .map(|c| c.len_utf16() as u32)
        .sum();
    (truncated.to_string(), cursor)
}

#[component]
pub fn PromptForm<F>(
    is_loading: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
    on_generate: F,
) -> impl IntoView
where
    F: Fn(GenerationRequest) + 'static + Clone + Send + Sync,
{
    let (prompt, set_prompt) = signal(String::new());
    let (quality, set_quality) = signal(Quality::default());
    let (style, set_style) = signal(Style::default());
    let (size, set_size) = signal(ImageSize::default());
    let textarea_ref = NodeRef::<Textarea>::new();

    let on_paste = move |_| {
        spawn_local(async move {
            let text = match read_clipboard_text().await {
                Ok(text) => text,
                Err(e) => {
                    gloo::console::error!(format!("Failed to read clipboard contents: {:?}", e));
                    return;
                }
            };
            let Some(el) = textarea_ref.get_untracked() else {
                return;
            };
            let start = el.selection_start().ok().flatten().unwrap_or(0);
            let end = el.selection_end().ok().flatten().unwrap_or(start);
            let (value, cursor) = insert_at_utf16(&el.value(), start, end, &text);

            el.set_value(&value);
            set_prompt.set(value);
            let _ = el.set_selection_range(cursor, cursor);
            let _ = el.focus();
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let request = GenerationRequest::new(prompt.get_untracked()).with_options(
            quality.get_untracked(),
            style.get_untracked(),
            size.get_untracked(),
        );
        on_generate(request);
    };

    view! {
        <div class="card">
            <h2>"Craft Your Masterpiece"</h2>

            {move || error.get().map(|message| view! {
                <div class="alert alert-destructive" role="alert">
                    <strong>"Error"</strong>
                    <p>{message}</p>
                </div>
            })}

            <form novalidate=true on:submit=on_submit class="prompt-form">
                <div class="form-group">
                    <label for="prompt">"Describe your vision:"</label>
                    <div class="textarea-wrapper">
                        <textarea
                            node_ref=textarea_ref
                            id="prompt"
                            name="prompt"
                            rows="6"
                            placeholder="Paint a picture with words - the more detailed, the better!"
                            maxlength=MAX_PROMPT_CHARS.to_string()
                            prop:value=move || prompt.get()
                            on:input=move |ev| {
                                set_prompt.set(truncate_prompt(&event_target_value(&ev)).to_string());
                            }
                        />
                        <button type="button" class="btn btn-outline btn-icon" title="Paste from clipboard" on:click=on_paste>
                            "📋"
                        </button>
                    </div>
                    <p class="text-muted char-count">
                        <span>"Let your imagination run wild. The more specific you are, the more amazing the result!"</span>
                        <span>{move || format!("{} / {}", prompt_char_count(&prompt.get()), MAX_PROMPT_CHARS)}</span>
                    </p>
                </div>

                <div class="options-grid">
                    <div class="form-group">
                        <label for="quality">"Quality:"</label>
                        <select
                            id="quality"
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse() {
                                    set_quality.set(value);
                                }
                            }
                        >
                            {Quality::ALL.into_iter().map(|q| view! {
                                <option value=q.as_str() selected=move || quality.get() == q>{q.label()}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="style">"Style:"</label>
                        <select
                            id="style"
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse() {
                                    set_style.set(value);
                                }
                            }
                        >
                            {Style::ALL.into_iter().map(|s| view! {
                                <option value=s.as_str() selected=move || style.get() == s>{s.label()}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="size">"Size:"</label>
                        <select
                            id="size"
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse() {
                                    set_size.set(value);
                                }
                            }
                        >
                            {ImageSize::ALL.into_iter().map(|s| view! {
                                <option value=s.as_str() selected=move || size.get() == s>{s.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <button type="submit" class="btn btn-primary btn-block" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Generating..." } else { "Generate Image" }}
                </button>
            </form>
        </div>
    }
}
