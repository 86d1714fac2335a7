//! 端末表示用の整形

use crate::error::Result;
use traceneuro_common::report::percent;
use traceneuro_common::{classify, serialize, DerivedStats, HistoryEntry, ReportFormat, SlotView};

/// 履歴一覧でのプレビュー文字数
const PREVIEW_CHARS: usize = 48;

/// 1 Slot分の表示
pub fn render_slot(view: &SlotView<'_>, format: ReportFormat) -> Result<String> {
    if let Some(error) = view.error {
        return Ok(format!("Error: {}\n", error));
    }

    let Some(result) = view.result else {
        return Ok("(no result)\n".to_string());
    };

    let mut out = serialize(result, format)?;
    if format == ReportFormat::Text {
        if let Some(stats) = &view.stats {
            out.push('\n');
            out.push_str(&render_stats(stats));
        }
    } else if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

pub fn render_stats(stats: &DerivedStats) -> String {
    format!(
        "Derived Statistics:\n  Words: {}\n  Avg words/sentence: {:.1}\n  Avg chars/word: {:.1}\n  Readability (est.): {:.1}\n",
        stats.word_count,
        stats.display_words_per_sentence(),
        stats.display_chars_per_word(),
        stats.display_readability(),
    )
}

/// 履歴一覧
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "履歴はありません\n".to_string();
    }

    entries
        .iter()
        .map(|e| {
            format!(
                "#{:<5} {:>8}  {:<16}  {}  {}\n",
                e.id,
                percent(e.human_score),
                classify(e.human_score),
                e.created_at.format("%Y-%m-%d %H:%M"),
                preview(&e.text_preview),
            )
        })
        .collect()
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_and_flattens() {
        assert_eq!(preview("short\n text"), "short text");
        let long = "word ".repeat(30);
        let shown = preview(&long);
        assert!(shown.ends_with('…'));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 1);
    }
}
