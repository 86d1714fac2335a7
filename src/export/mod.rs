//! レポートのファイル出力

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use traceneuro_common::{export_file_name, export_report, ReportFormat, ScoreResult, SlotId};

/// 出力先パス（セカンダリはファイル名に接尾辞を付ける）
pub fn output_path(
    output_dir: &Path,
    format: ReportFormat,
    generated_at: DateTime<Utc>,
    slot: SlotId,
) -> PathBuf {
    let file_name = export_file_name(format, generated_at);
    match slot {
        SlotId::Primary => output_dir.join(file_name),
        SlotId::Secondary => {
            let ext = format!(".{}", format.extension());
            let stem = file_name.trim_end_matches(ext.as_str());
            output_dir.join(format!("{}-{}{}", stem, slot.as_str(), ext))
        }
    }
}

/// JSONとテキストの両方を書き出す
pub fn export_results(
    result: &ScoreResult,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
    slot: SlotId,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for format in [ReportFormat::Json, ReportFormat::Text] {
        let path = output_path(output_dir, format, generated_at, slot);
        let content = export_report(result, format, generated_at)?;
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "report exported");
        written.push(path);
    }

    Ok(written)
}
