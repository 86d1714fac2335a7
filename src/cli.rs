use clap::{Parser, Subcommand};
use std::path::PathBuf;
use traceneuro_common::{ReportFormat, SampleKind};

#[derive(Parser)]
#[command(name = "traceneuro")]
#[command(about = "テキスト真正性スコアリング・ダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストをスコアリング
    Score {
        /// 入力テキストファイル（省略時は --text か標準入力）
        input: Option<PathBuf>,

        /// テキストを直接指定
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// 比較用の2つ目のテキストファイル（比較モード）
        #[arg(short, long)]
        compare: Option<PathBuf>,

        /// サンプルテキストを使用 (human/ai)
        #[arg(long, conflicts_with_all = ["input", "text"])]
        sample: Option<SampleKind>,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// レポートを書き出すディレクトリ
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// 直近の解析履歴を表示
    History {
        /// 指定IDの履歴をレポートとして表示
        #[arg(short, long)]
        show: Option<i64>,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// サービスの稼働確認
    Health,

    /// サンプルテキストを表示
    Sample {
        /// 種類 (human/ai)
        #[arg(default_value = "human")]
        kind: SampleKind,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
