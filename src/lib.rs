//! Artistry Studio
//!
//! テキストから画像を生成するスタジオのゲートウェイサーバーとCLI。
//! ギャラリーストア本体は `artistry_common` にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod server;
pub mod session;
pub mod storage;
pub mod studio;
