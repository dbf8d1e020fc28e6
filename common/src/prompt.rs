//! プロンプトの文字数制限

/// プロンプトの最大文字数
pub const MAX_PROMPT_CHARS: usize = 1000;

/// 最大文字数で切り詰める（文字境界を守る）
pub fn truncate_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

/// 文字数（カウンター表示用）
pub fn prompt_char_count(prompt: &str) -> usize {
    prompt.chars().count()
}

/// 送信用に整える
///
/// 空白のみならNone、長すぎれば切り詰める。
pub fn normalize_prompt(prompt: &str) -> Option<String> {
    if prompt.trim().is_empty() {
        return None;
    }
    Some(truncate_prompt(prompt).to_string())
}
