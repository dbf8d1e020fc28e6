mod clipboard;
mod gateway;

pub use clipboard::read_clipboard_text;
pub use gateway::request_generation;
