//! レポート出力
//!
//! ScoreResultをJSON/テキストに変換する純粋関数群。
//! ネットワークやDOMには依存しない。
//!
//! - エクスポート: テキスト形式の先頭に生成日時の行を付ける
//! - クリップボード: 生成日時の行を付けない

use crate::error::Result;
use crate::markers::{display_label, ordered_breakdown};
use crate::types::ScoreResult;
use chrono::{DateTime, Utc};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    #[default]
    Text,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }

    /// ブラウザのダウンロード用MIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Text => "text/plain",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(format!("Unknown format: {}. Use json or text", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

/// HumanScoreによる分類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    LikelyHuman,
    Uncertain,
    LikelyAi,
}

/// 分類の閾値（境界値は上の区分）
pub const HUMAN_THRESHOLD: f64 = 0.7;
pub const UNCERTAIN_THRESHOLD: f64 = 0.4;

impl Classification {
    pub fn from_score(score: f64) -> Self {
        if score >= HUMAN_THRESHOLD {
            Classification::LikelyHuman
        } else if score >= UNCERTAIN_THRESHOLD {
            Classification::Uncertain
        } else {
            Classification::LikelyAi
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::LikelyHuman => "Likely Human",
            Classification::Uncertain => "Uncertain/Hybrid",
            Classification::LikelyAi => "Likely AI",
        }
    }

    /// CSSクラス名（Web表示用）
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::LikelyHuman => "human",
            Classification::Uncertain => "uncertain",
            Classification::LikelyAi => "ai",
        }
    }
}

pub fn classify(score: f64) -> &'static str {
    Classification::from_score(score).label()
}

/// 0-1のスコアをパーセント表記に
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// 結果をシリアライズ
///
/// JSONは整形済みの完全なScoreResult、テキストは固定テンプレート。
pub fn serialize(result: &ScoreResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Text => Ok(render_text(result)),
    }
}

/// エクスポート用（テキスト形式は生成日時を先頭に付ける）
pub fn export_report(
    result: &ScoreResult,
    format: ReportFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let body = serialize(result, format)?;
    match format {
        ReportFormat::Json => Ok(body),
        ReportFormat::Text => Ok(format!(
            "Generated: {}\n{}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            body
        )),
    }
}

/// クリップボード用（生成日時なし）
pub fn clipboard_text(result: &ScoreResult) -> String {
    render_text(result)
}

/// エクスポートファイル名（セッション内で一意になるようミリ秒まで埋め込む）
pub fn export_file_name(format: ReportFormat, generated_at: DateTime<Utc>) -> String {
    format!(
        "traceneuro-report-{}.{}",
        generated_at.format("%Y%m%d-%H%M%S-%3f"),
        format.extension()
    )
}

fn render_text(result: &ScoreResult) -> String {
    let mut lines = vec![
        "TraceNeuro Analysis Report".to_string(),
        format!("HumanScore: {}", percent(result.human_score)),
        format!("Classification: {}", classify(result.human_score)),
    ];

    if result.reconstructed {
        lines.push("Note: restored from history, metadata unavailable".to_string());
    }

    lines.push(String::new());
    lines.push("Breakdown:".to_string());
    for (key, value) in ordered_breakdown(&result.breakdown) {
        lines.push(format!("  {}: {}", display_label(key), percent(value)));
    }

    let meta = &result.metadata;
    lines.push(String::new());
    lines.push("Metadata:".to_string());
    lines.push(format!("  Sentences: {}", meta.sentence_count));
    lines.push(format!("  Tokens: {}", meta.token_count));
    lines.push(format!("  Characters: {}", meta.char_count));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
