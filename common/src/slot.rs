//! Slotコントローラ
//!
//! 1つのテキストバッファと、その解析状態（結果/エラー/送信中）を持つ。
//! プライマリ/セカンダリの2つが互いに独立して動く。
//!
//! 状態遷移:
//! - 送信: 10文字未満 → Failed（通信しない） / それ以外 → Pending
//! - 完了: 成功 → Succeeded / 失敗 → Failed（以前の結果は消す）
//! - クリア: → Idle
//!
//! エラーは外に投げず、すべて `error` フィールドに格納する。

use crate::error::ServiceError;
use crate::metrics::{derive_stats, DerivedStats};
use crate::service::ScoringService;
use crate::types::{ScoreRequest, ScoreResult};

/// 入力の最小文字数（trim後）
pub const MIN_TEXT_LENGTH: usize = 10;

pub const VALIDATION_ERROR: &str = "Text must be at least 10 characters";

/// Slotの識別子
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    Primary,
    Secondary,
}

impl SlotId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::Primary => "primary",
            SlotId::Secondary => "secondary",
        }
    }
}

/// Slotのステータス
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Idle => "idle",
            SlotStatus::Pending => "pending",
            SlotStatus::Succeeded => "succeeded",
            SlotStatus::Failed => "failed",
        }
    }
}

/// 送信チケット
///
/// 応答は発行時の世代と一緒に戻す。クリア/リセット後に届いた応答は破棄される。
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub generation: u64,
    pub request: ScoreRequest,
}

/// 応答の適用結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed,
    /// 世代が古い、または送信中でない
    Discarded,
}

/// 独立した解析単位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    text: String,
    status: SlotStatus,
    result: Option<ScoreResult>,
    error: Option<String>,
    generation: u64,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 履歴から復元したSlot（Succeeded）
    pub fn restored(text: String, result: ScoreResult) -> Self {
        Self {
            text,
            status: SlotStatus::Succeeded,
            result: Some(result),
            error: None,
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.status == SlotStatus::Pending
    }

    /// テキスト編集（送信中でもキャンセルしない）
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// 送信を開始
    ///
    /// 入力が短ければFailedにして `None`。送信中の場合も `None`（1 Slotにつき同時1件）。
    pub fn begin_submit(&mut self) -> Option<Ticket> {
        if self.is_pending() {
            tracing::debug!("submit ignored: request already pending");
            return None;
        }

        if self.text.trim().chars().count() < MIN_TEXT_LENGTH {
            self.status = SlotStatus::Failed;
            self.result = None;
            self.error = Some(VALIDATION_ERROR.to_string());
            return None;
        }

        self.status = SlotStatus::Pending;
        self.error = None;
        Some(Ticket {
            generation: self.generation,
            request: ScoreRequest::new(self.text.clone()),
        })
    }

    /// 応答を適用
    ///
    /// 結果は送信時のテキストに対するもの。表示テキストは最新の編集のまま。
    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<ScoreResult, ServiceError>,
    ) -> Resolution {
        if generation != self.generation || !self.is_pending() {
            tracing::debug!(
                generation,
                current = self.generation,
                "stale scoring response discarded"
            );
            return Resolution::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.status = SlotStatus::Succeeded;
                self.result = Some(result);
                self.error = None;
                Resolution::Succeeded
            }
            Err(e) => {
                self.status = SlotStatus::Failed;
                self.result = None;
                self.error = Some(e.slot_message());
                Resolution::Failed
            }
        }
    }

    /// クリア（世代を進めて送信中の応答を無効化する）
    pub fn clear(&mut self) {
        self.text.clear();
        self.status = SlotStatus::Idle;
        self.result = None;
        self.error = None;
        self.generation += 1;
    }

    /// 別のSlotで置き換える（世代は引き継いで進める）
    pub fn replace_with(&mut self, mut other: Slot) {
        other.generation = self.generation + 1;
        *self = other;
    }

    /// このSlot自身のテキストと結果から派生統計を計算
    pub fn stats(&self) -> Option<DerivedStats> {
        derive_stats(Some(&self.text), self.result.as_ref())
    }

    /// テキストを設定して送信し、応答を待って適用する
    ///
    /// 失敗はすべてSlotに格納される。戻り値が `Succeeded` の場合、呼び出し側が履歴を更新する。
    pub async fn submit<S: ScoringService>(
        &mut self,
        text: impl Into<String>,
        service: &S,
    ) -> Resolution {
        self.set_text(text);
        let Some(ticket) = self.begin_submit() else {
            return if self.is_pending() {
                Resolution::Discarded
            } else {
                Resolution::Failed
            };
        };

        let outcome = service.score(&ticket.request).await;
        self.resolve(ticket.generation, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Breakdown;
    use std::cell::Cell;

    /// 呼び出し回数を数えるスタブ
    struct StubScorer {
        outcome: Result<ScoreResult, ServiceError>,
        calls: Cell<usize>,
    }

    impl StubScorer {
        fn new(outcome: Result<ScoreResult, ServiceError>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
            }
        }
    }

    impl ScoringService for StubScorer {
        async fn score(&self, _request: &ScoreRequest) -> Result<ScoreResult, ServiceError> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.clone()
        }
    }

    fn sample_result(score: f64) -> ScoreResult {
        let mut breakdown = Breakdown::new();
        breakdown.insert("drift".to_string(), 0.9);
        ScoreResult {
            human_score: score,
            breakdown,
            ..Default::default()
        }
    }

    #[test]
    fn test_short_text_fails_validation() {
        for text in ["", "short", "   padded   ", "123456789", "\n\n  abc  \n"] {
            let mut slot = Slot::new();
            slot.set_text(text);
            assert!(slot.begin_submit().is_none(), "送信されてしまった: {:?}", text);
            assert_eq!(slot.status(), SlotStatus::Failed);
            assert_eq!(slot.error(), Some(VALIDATION_ERROR));
            assert!(slot.result().is_none());
        }
    }

    #[test]
    fn test_trim_is_applied_before_length_check() {
        let mut slot = Slot::new();
        slot.set_text("          abc          ");
        assert!(slot.begin_submit().is_none());

        slot.set_text("0123456789");
        assert!(slot.begin_submit().is_some());
    }

    #[test]
    fn test_begin_submit_clears_error() {
        let mut slot = Slot::new();
        slot.set_text("tiny");
        slot.begin_submit();
        assert!(slot.error().is_some());

        slot.set_text("this is long enough");
        let ticket = slot.begin_submit().expect("送信されるべき");
        assert_eq!(slot.status(), SlotStatus::Pending);
        assert!(slot.error().is_none());
        assert_eq!(ticket.request.text, "this is long enough");
        assert!(ticket.request.options.include_breakdown);
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut slot = Slot::new();
        slot.set_text("this is long enough");
        assert!(slot.begin_submit().is_some());
        assert!(slot.begin_submit().is_none());
        assert_eq!(slot.status(), SlotStatus::Pending);
    }

    #[test]
    fn test_failure_clears_previous_result() {
        let mut slot = Slot::new();
        slot.set_text("this is long enough");
        let ticket = slot.begin_submit().unwrap();
        slot.resolve(ticket.generation, Ok(sample_result(0.8)));
        assert!(slot.result().is_some());

        let ticket = slot.begin_submit().unwrap();
        let resolution = slot.resolve(ticket.generation, Err(ServiceError::Status(500)));
        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(slot.status(), SlotStatus::Failed);
        assert!(slot.result().is_none());
        assert_eq!(slot.error(), Some("Scoring failed"));
    }

    #[test]
    fn test_transport_error_message_kept() {
        let mut slot = Slot::new();
        slot.set_text("this is long enough");
        let ticket = slot.begin_submit().unwrap();
        slot.resolve(
            ticket.generation,
            Err(ServiceError::Transport("error sending request".to_string())),
        );
        assert_eq!(slot.error(), Some("error sending request"));
    }

    #[test]
    fn test_edit_during_pending_keeps_latest_text() {
        let mut slot = Slot::new();
        slot.set_text("original submitted text");
        let ticket = slot.begin_submit().unwrap();

        slot.set_text("edited while waiting");
        let resolution = slot.resolve(ticket.generation, Ok(sample_result(0.5)));

        assert_eq!(resolution, Resolution::Succeeded);
        assert_eq!(slot.text(), "edited while waiting");
        assert_eq!(slot.result().unwrap().human_score, 0.5);
    }

    #[test]
    fn test_response_after_clear_is_discarded() {
        let mut slot = Slot::new();
        slot.set_text("this is long enough");
        let ticket = slot.begin_submit().unwrap();

        slot.clear();
        let resolution = slot.resolve(ticket.generation, Ok(sample_result(0.9)));

        assert_eq!(resolution, Resolution::Discarded);
        assert_eq!(slot.status(), SlotStatus::Idle);
        assert!(slot.result().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut slot = Slot::new();
        slot.set_text("short");
        slot.begin_submit();
        slot.clear();

        assert_eq!(slot.text(), "");
        assert_eq!(slot.status(), SlotStatus::Idle);
        assert!(slot.error().is_none());
        assert!(slot.result().is_none());
    }

    #[test]
    fn test_stats_use_own_text_and_result() {
        let mut slot = Slot::new();
        assert!(slot.stats().is_none());

        slot.set_text("one two three four five six");
        let ticket = slot.begin_submit().unwrap();
        let mut result = sample_result(0.7);
        result.metadata.sentence_count = 2;
        slot.resolve(ticket.generation, Ok(result));

        let stats = slot.stats().expect("統計が計算されない");
        assert_eq!(stats.avg_words_per_sentence, 3.0);
    }

    #[tokio::test]
    async fn test_submit_short_text_makes_no_call() {
        let scorer = StubScorer::new(Ok(sample_result(0.9)));
        let mut slot = Slot::new();

        let resolution = slot.submit("too short", &scorer).await;

        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(scorer.calls.get(), 0);
        assert_eq!(slot.error(), Some(VALIDATION_ERROR));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let expected = sample_result(0.85);
        let scorer = StubScorer::new(Ok(expected.clone()));
        let mut slot = Slot::new();

        let resolution = slot.submit("a perfectly reasonable sentence", &scorer).await;

        assert_eq!(resolution, Resolution::Succeeded);
        assert_eq!(scorer.calls.get(), 1);
        assert_eq!(slot.status(), SlotStatus::Succeeded);
        assert_eq!(slot.result(), Some(&expected));
        assert!(slot.error().is_none());
    }

    #[tokio::test]
    async fn test_submit_failure_never_panics() {
        let scorer = StubScorer::new(Err(ServiceError::Status(502)));
        let mut slot = Slot::new();

        let resolution = slot.submit("a perfectly reasonable sentence", &scorer).await;

        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(slot.error(), Some("Scoring failed"));
        // 失敗後もすぐ再送信できる
        assert!(slot.begin_submit().is_some());
    }
}
