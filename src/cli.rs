use artistry_common::{ImageSize, Quality, Style};
use clap::{Parser, Subcommand};

/// セッション有効期間の上限（100年）
pub const MAX_TTL_HOURS: i64 = 24 * 365 * 100;

#[derive(Parser)]
#[command(name = "artistry-studio")]
#[command(about = "AI image generation studio: gateway server and personal gallery", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 生成ゲートウェイ（POST /api/）を起動
    Serve {
        /// 待ち受けポート（省略時は設定値）
        #[arg(short, long)]
        port: Option<u16>,

        /// 生成にセッションを必須にする
        #[arg(long)]
        require_session: bool,
    },

    /// 画像を生成してギャラリーに追加
    Generate {
        /// プロンプト（1000文字を超える分は切り捨て）
        #[arg(required = true)]
        prompt: String,

        /// 画質 (hd/standard)
        #[arg(short, long, default_value = "hd")]
        quality: Quality,

        /// スタイル (vivid/natural)
        #[arg(long, default_value = "vivid")]
        style: Style,

        /// サイズ (1024x1024/1792x1024/1024x1792)
        #[arg(long, default_value = "1024x1024")]
        size: ImageSize,
    },

    /// ギャラリーを表示/編集
    Gallery {
        /// 指定したURLを削除
        #[arg(long)]
        remove: Option<String>,

        /// 全て削除
        #[arg(long)]
        clear: bool,

        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// セッショントークンを発行（ユーザー名）
        #[arg(long)]
        add_session: Option<String>,

        /// セッションの有効期間（時間）
        #[arg(long, requires = "add_session", value_parser = clap::value_parser!(i64).range(1..=MAX_TTL_HOURS))]
        ttl_hours: Option<i64>,
    },
}
