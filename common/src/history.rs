//! 履歴キャッシュ
//!
//! 履歴ストアの直近5件をミラーする（読み取り専用）。
//! 取得に失敗しても以前の内容を保持し、ユーザーにはエラーを見せない。

use crate::error::ServiceError;
use crate::service::HistoryService;
use crate::slot::Slot;
use crate::types::{HistoryEntry, ScoreMetadata, ScoreResult};

/// 取得件数の上限
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCache {
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュ済みエントリ（新しい順）
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 取得結果を反映
    ///
    /// 失敗時は内容を変えずにログだけ残す。戻り値は更新したかどうか。
    pub fn apply(&mut self, outcome: Result<Vec<HistoryEntry>, ServiceError>) -> bool {
        match outcome {
            Ok(mut entries) => {
                entries.truncate(HISTORY_LIMIT);
                self.entries = entries;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "history refresh failed, keeping cached entries");
                false
            }
        }
    }

    /// 履歴ストアから再取得
    pub async fn refresh<S: HistoryService>(&mut self, service: &S) -> bool {
        let outcome = service.recent(HISTORY_LIMIT).await;
        self.apply(outcome)
    }
}

/// 履歴エントリをSlotに復元
///
/// プレビューには完全なメタデータが無いため、メタデータはゼロ埋めし
/// `reconstructed` を立てる。このメタデータを元テキストの統計として使ってはいけない。
pub fn rehydrate(entry: &HistoryEntry) -> Slot {
    let result = ScoreResult {
        human_score: entry.human_score,
        breakdown: entry.breakdown.clone(),
        metadata: ScoreMetadata::default(),
        reconstructed: true,
    };
    Slot::restored(entry.text_preview.clone(), result)
}
