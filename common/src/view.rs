//! ビュー状態マシン
//!
//! 2つのSlot、比較モード、履歴キャッシュ、表示フラグをまとめた状態と、
//! `update(state, message) -> Transition` の遷移関数。
//!
//! 状態は遷移ごとに値として受け渡す（グローバルな可変状態を持たない）。
//! 通信やタイマーなどの副作用は `Effect` として返し、ホスト（CLI/ブラウザ）が実行する。

use crate::error::ServiceError;
use crate::history::{rehydrate, HistoryCache, HISTORY_LIMIT};
use crate::metrics::DerivedStats;
use crate::samples::SampleKind;
use crate::slot::{Resolution, Slot, SlotId};
use crate::types::{HistoryEntry, ScoreRequest, ScoreResult};
use std::time::Duration;

/// コピー完了表示の継続時間
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// 表示モード
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Single,
    Comparison,
}

/// 画面全体の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub primary: Slot,
    /// Singleモードでは無効（表示しない）
    pub secondary: Slot,
    pub mode: ViewMode,
    pub history_visible: bool,
    pub history: HistoryCache,
    pub dark_mode: bool,
    /// 直近にコピーしたSlot（"Copied!" 表示中のみ）
    pub copy_acknowledged: Option<SlotId>,
    copy_token: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparison_enabled(&self) -> bool {
        self.mode == ViewMode::Comparison
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        match id {
            SlotId::Primary => &self.primary,
            SlotId::Secondary => &self.secondary,
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        match id {
            SlotId::Primary => &mut self.primary,
            SlotId::Secondary => &mut self.secondary,
        }
    }

    /// 表示対象のSlotか（Singleモードのセカンダリは無効）
    pub fn is_active(&self, id: SlotId) -> bool {
        id == SlotId::Primary || self.comparison_enabled()
    }

    /// 表示用のスナップショット（無効なSlotは `None`）
    pub fn view(&self, id: SlotId) -> Option<SlotView<'_>> {
        if !self.is_active(id) {
            return None;
        }
        let slot = self.slot(id);
        Some(SlotView {
            id,
            text: slot.text(),
            result: slot.result(),
            stats: slot.stats(),
            error: slot.error(),
            loading: slot.is_pending(),
        })
    }

    pub fn is_copy_acknowledged(&self, id: SlotId) -> bool {
        self.copy_acknowledged == Some(id)
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }
}

/// プレゼンテーション層に渡す1 Slot分の情報
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView<'a> {
    pub id: SlotId,
    pub text: &'a str,
    pub result: Option<&'a ScoreResult>,
    pub stats: Option<DerivedStats>,
    pub error: Option<&'a str>,
    pub loading: bool,
}

/// 入力イベント
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TextChanged { slot: SlotId, text: String },
    Submit(SlotId),
    ScoreCompleted {
        slot: SlotId,
        generation: u64,
        outcome: Result<ScoreResult, ServiceError>,
    },
    Clear(SlotId),
    ToggleComparison,
    ToggleDarkMode,
    ToggleHistory,
    RefreshHistory,
    HistoryLoaded(Result<Vec<HistoryEntry>, ServiceError>),
    Rehydrate(i64),
    LoadSample(SampleKind),
    /// クリップボードへの書き込みが完了した
    Copied(SlotId),
    CopyAckExpired(u64),
}

/// ホストが実行する副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// スコアリング要求（完了したら `ScoreCompleted` を返す）
    Score {
        slot: SlotId,
        generation: u64,
        request: ScoreRequest,
    },
    /// 履歴の再取得（完了したら `HistoryLoaded` を返す）。Slotの遷移を待たせない
    RefreshHistory { limit: usize },
    /// 一定時間後に `CopyAckExpired(token)` を返す
    ScheduleCopyReset { token: u64, after: Duration },
}

/// 遷移結果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: ViewState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: ViewState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

fn refresh_history() -> Effect {
    Effect::RefreshHistory {
        limit: HISTORY_LIMIT,
    }
}

/// 状態遷移
pub fn update(mut state: ViewState, message: Message) -> Transition {
    match message {
        Message::TextChanged { slot, text } => {
            state.slot_mut(slot).set_text(text);
            Transition::new(state)
        }

        Message::Submit(slot) => {
            if !state.is_active(slot) {
                return Transition::new(state);
            }
            match state.slot_mut(slot).begin_submit() {
                Some(ticket) => {
                    tracing::debug!(slot = slot.as_str(), "scoring request issued");
                    Transition::with(
                        state,
                        Effect::Score {
                            slot,
                            generation: ticket.generation,
                            request: ticket.request,
                        },
                    )
                }
                None => Transition::new(state),
            }
        }

        Message::ScoreCompleted {
            slot,
            generation,
            outcome,
        } => match state.slot_mut(slot).resolve(generation, outcome) {
            Resolution::Succeeded => Transition::with(state, refresh_history()),
            Resolution::Failed | Resolution::Discarded => Transition::new(state),
        },

        Message::Clear(slot) => {
            state.slot_mut(slot).clear();
            Transition::new(state)
        }

        Message::ToggleComparison => {
            // どちらの方向でもセカンダリをリセット（古い結果を再表示しない）
            state.mode = match state.mode {
                ViewMode::Single => ViewMode::Comparison,
                ViewMode::Comparison => ViewMode::Single,
            };
            state.secondary.clear();
            Transition::new(state)
        }

        Message::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            Transition::new(state)
        }

        Message::ToggleHistory => {
            state.history_visible = !state.history_visible;
            if state.history_visible {
                Transition::with(state, refresh_history())
            } else {
                Transition::new(state)
            }
        }

        Message::RefreshHistory => Transition::with(state, refresh_history()),

        Message::HistoryLoaded(outcome) => {
            state.history.apply(outcome);
            Transition::new(state)
        }

        Message::Rehydrate(id) => {
            match state.history.find(id).map(rehydrate) {
                Some(slot) => state.primary.replace_with(slot),
                None => tracing::warn!(id, "history entry not in cache"),
            }
            Transition::new(state)
        }

        Message::LoadSample(kind) => {
            let target = match (state.mode, kind) {
                (ViewMode::Comparison, SampleKind::Ai) => SlotId::Secondary,
                _ => SlotId::Primary,
            };
            state.slot_mut(target).set_text(kind.text());
            Transition::new(state)
        }

        Message::Copied(slot) => {
            state.copy_token += 1;
            state.copy_acknowledged = Some(slot);
            let token = state.copy_token;
            Transition::with(
                state,
                Effect::ScheduleCopyReset {
                    token,
                    after: COPY_ACK_DURATION,
                },
            )
        }

        Message::CopyAckExpired(token) => {
            // 後から別のコピーがあれば、そのタイマーに任せる
            if token == state.copy_token {
                state.copy_acknowledged = None;
            }
            Transition::new(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{SlotStatus, VALIDATION_ERROR};
    use crate::types::Breakdown;
    use chrono::{TimeZone, Utc};

    const LONG_TEXT: &str = "This text is certainly long enough to submit.";

    fn result(score: f64) -> ScoreResult {
        let mut breakdown = Breakdown::new();
        breakdown.insert("drift".to_string(), 0.9);
        breakdown.insert("cadence".to_string(), 0.8);
        let mut result = ScoreResult {
            human_score: score,
            breakdown,
            ..Default::default()
        };
        result.metadata.sentence_count = 3;
        result
    }

    fn entry(id: i64, score: f64) -> HistoryEntry {
        let mut breakdown = Breakdown::new();
        breakdown.insert("drift".to_string(), 0.5);
        HistoryEntry {
            id,
            text_preview: "restored preview text".to_string(),
            human_score: score,
            breakdown,
            created_at: Utc.with_ymd_and_hms(2026, 1, 18, 9, 0, 0).unwrap(),
        }
    }

    /// テキスト入力→送信し、発行された要求の世代を返す
    fn submit(state: ViewState, slot: SlotId, text: &str) -> (ViewState, u64) {
        let state = update(
            state,
            Message::TextChanged {
                slot,
                text: text.to_string(),
            },
        )
        .state;
        let transition = update(state, Message::Submit(slot));
        let generation = match transition.effects.as_slice() {
            [Effect::Score { generation, .. }] => *generation,
            other => panic!("Score effectが無い: {:?}", other),
        };
        (transition.state, generation)
    }

    fn complete(
        state: ViewState,
        slot: SlotId,
        generation: u64,
        outcome: Result<ScoreResult, ServiceError>,
    ) -> Transition {
        update(
            state,
            Message::ScoreCompleted {
                slot,
                generation,
                outcome,
            },
        )
    }

    fn comparison_state() -> ViewState {
        update(ViewState::new(), Message::ToggleComparison).state
    }

    #[test]
    fn test_short_text_no_effect() {
        let state = update(
            ViewState::new(),
            Message::TextChanged {
                slot: SlotId::Primary,
                text: "tiny".to_string(),
            },
        )
        .state;
        let transition = update(state, Message::Submit(SlotId::Primary));

        assert!(transition.effects.is_empty());
        assert_eq!(transition.state.primary.status(), SlotStatus::Failed);
        assert_eq!(transition.state.primary.error(), Some(VALIDATION_ERROR));
    }

    #[test]
    fn test_submit_issues_score_effect() {
        let state = update(
            ViewState::new(),
            Message::TextChanged {
                slot: SlotId::Primary,
                text: LONG_TEXT.to_string(),
            },
        )
        .state;
        let transition = update(state, Message::Submit(SlotId::Primary));

        assert_eq!(transition.state.primary.status(), SlotStatus::Pending);
        match &transition.effects[..] {
            [Effect::Score { slot, request, .. }] => {
                assert_eq!(*slot, SlotId::Primary);
                assert_eq!(request.text, LONG_TEXT);
            }
            other => panic!("想定外のeffect: {:?}", other),
        }
    }

    #[test]
    fn test_success_requests_history_refresh_once() {
        let (state, generation) = submit(ViewState::new(), SlotId::Primary, LONG_TEXT);
        let transition = complete(state, SlotId::Primary, generation, Ok(result(0.85)));

        assert_eq!(transition.state.primary.status(), SlotStatus::Succeeded);
        assert_eq!(
            transition.effects,
            vec![Effect::RefreshHistory { limit: HISTORY_LIMIT }]
        );
    }

    #[test]
    fn test_failure_does_not_refresh_history() {
        let (state, generation) = submit(ViewState::new(), SlotId::Primary, LONG_TEXT);
        let transition = complete(state, SlotId::Primary, generation, Err(ServiceError::Status(500)));

        assert!(transition.effects.is_empty());
        assert_eq!(transition.state.primary.error(), Some("Scoring failed"));
    }

    #[test]
    fn test_slots_are_independent() {
        let state = comparison_state();
        let (state, primary_gen) = submit(state, SlotId::Primary, LONG_TEXT);
        let (state, secondary_gen) = submit(state, SlotId::Secondary, LONG_TEXT);

        // セカンダリを失敗させてもプライマリは Pending のまま
        let state = complete(
            state,
            SlotId::Secondary,
            secondary_gen,
            Err(ServiceError::Transport("connection reset".to_string())),
        )
        .state;
        assert_eq!(state.primary.status(), SlotStatus::Pending);
        assert!(state.primary.error().is_none());
        assert_eq!(state.secondary.status(), SlotStatus::Failed);

        let state = complete(state, SlotId::Primary, primary_gen, Ok(result(0.9))).state;
        assert_eq!(state.primary.status(), SlotStatus::Succeeded);
        assert_eq!(state.secondary.status(), SlotStatus::Failed);
        assert_eq!(state.secondary.error(), Some("connection reset"));
        assert!(state.secondary.result().is_none());
    }

    #[test]
    fn test_clear_only_affects_one_slot() {
        let state = comparison_state();
        let (state, generation) = submit(state, SlotId::Primary, LONG_TEXT);
        let state = complete(state, SlotId::Primary, generation, Ok(result(0.5))).state;
        let state = update(
            state,
            Message::TextChanged {
                slot: SlotId::Secondary,
                text: "secondary text".to_string(),
            },
        )
        .state;

        let state = update(state, Message::Clear(SlotId::Secondary)).state;
        assert_eq!(state.secondary.text(), "");
        assert_eq!(state.primary.status(), SlotStatus::Succeeded);
    }

    #[test]
    fn test_comparison_round_trip_resets_secondary() {
        let state = comparison_state();
        let (state, generation) = submit(state, SlotId::Secondary, LONG_TEXT);
        let state = complete(state, SlotId::Secondary, generation, Ok(result(0.3))).state;
        assert_eq!(state.secondary.status(), SlotStatus::Succeeded);

        let state = update(state, Message::ToggleComparison).state;
        assert_eq!(state.mode, ViewMode::Single);
        let state = update(state, Message::ToggleComparison).state;

        assert_eq!(state.mode, ViewMode::Comparison);
        assert_eq!(state.secondary.status(), SlotStatus::Idle);
        assert_eq!(state.secondary.text(), "");
        assert!(state.secondary.result().is_none());
    }

    #[test]
    fn test_late_secondary_response_after_toggle_is_discarded() {
        let state = comparison_state();
        let (state, generation) = submit(state, SlotId::Secondary, LONG_TEXT);

        let state = update(state, Message::ToggleComparison).state;
        let state = update(state, Message::ToggleComparison).state;
        let transition = complete(state, SlotId::Secondary, generation, Ok(result(0.3)));

        assert!(transition.effects.is_empty());
        assert_eq!(transition.state.secondary.status(), SlotStatus::Idle);
    }

    #[test]
    fn test_secondary_inert_in_single_mode() {
        let state = update(
            ViewState::new(),
            Message::TextChanged {
                slot: SlotId::Secondary,
                text: LONG_TEXT.to_string(),
            },
        )
        .state;
        let transition = update(state, Message::Submit(SlotId::Secondary));

        assert!(transition.effects.is_empty());
        assert!(transition.state.view(SlotId::Secondary).is_none());
        assert!(transition.state.view(SlotId::Primary).is_some());
    }

    #[test]
    fn test_flags_do_not_touch_slots() {
        let (state, _) = submit(ViewState::new(), SlotId::Primary, LONG_TEXT);
        let before = state.primary.clone();

        let state = update(state, Message::ToggleDarkMode).state;
        assert!(state.dark_mode);
        let transition = update(state, Message::ToggleHistory);
        assert!(transition.state.history_visible);
        assert_eq!(transition.effects, vec![Effect::RefreshHistory { limit: 5 }]);

        let transition = update(transition.state, Message::ToggleHistory);
        assert!(!transition.state.history_visible);
        assert!(transition.effects.is_empty());
        assert_eq!(transition.state.primary, before);
    }

    #[test]
    fn test_load_sample_single_mode() {
        let state = update(ViewState::new(), Message::LoadSample(SampleKind::Ai)).state;
        assert_eq!(state.primary.text(), SampleKind::Ai.text());
        assert_eq!(state.secondary.text(), "");
        assert_eq!(state.primary.status(), SlotStatus::Idle);
    }

    #[test]
    fn test_load_sample_comparison_mode() {
        let state = comparison_state();
        let state = update(state, Message::LoadSample(SampleKind::Human)).state;
        let transition = update(state, Message::LoadSample(SampleKind::Ai));

        assert!(transition.effects.is_empty());
        assert_eq!(transition.state.primary.text(), SampleKind::Human.text());
        assert_eq!(transition.state.secondary.text(), SampleKind::Ai.text());
    }

    #[test]
    fn test_history_loaded_failure_keeps_entries() {
        let state = update(
            ViewState::new(),
            Message::HistoryLoaded(Ok(vec![entry(1, 0.62)])),
        )
        .state;
        let state = update(
            state,
            Message::HistoryLoaded(Err(ServiceError::Status(500))),
        )
        .state;
        assert_eq!(state.history_entries().len(), 1);
    }

    #[test]
    fn test_rehydrate_into_primary() {
        let state = update(
            ViewState::new(),
            Message::HistoryLoaded(Ok(vec![entry(1, 0.62)])),
        )
        .state;
        let state = update(state, Message::Rehydrate(1)).state;

        assert_eq!(state.primary.status(), SlotStatus::Succeeded);
        let result = state.primary.result().unwrap();
        assert_eq!(result.human_score, 0.62);
        assert_eq!(result.metadata.sentence_count, 0);
        assert!(result.reconstructed);
    }

    #[test]
    fn test_rehydrate_discards_pending_primary_response() {
        let state = update(
            ViewState::new(),
            Message::HistoryLoaded(Ok(vec![entry(1, 0.62)])),
        )
        .state;
        let (state, generation) = submit(state, SlotId::Primary, LONG_TEXT);
        let state = update(state, Message::Rehydrate(1)).state;

        let state = complete(state, SlotId::Primary, generation, Ok(result(0.99))).state;
        assert_eq!(state.primary.result().unwrap().human_score, 0.62);
    }

    #[test]
    fn test_rehydrate_unknown_id_is_noop() {
        let state = ViewState::new();
        let after = update(state.clone(), Message::Rehydrate(42)).state;
        assert_eq!(after, state);
    }

    #[test]
    fn test_copy_acknowledgement_expires() {
        let transition = update(ViewState::new(), Message::Copied(SlotId::Primary));
        assert!(transition.state.is_copy_acknowledged(SlotId::Primary));
        assert!(!transition.state.is_copy_acknowledged(SlotId::Secondary));
        let token = match transition.effects.as_slice() {
            [Effect::ScheduleCopyReset { token, after }] => {
                assert_eq!(*after, Duration::from_secs(2));
                *token
            }
            other => panic!("想定外のeffect: {:?}", other),
        };

        let state = update(transition.state, Message::CopyAckExpired(token)).state;
        assert!(state.copy_acknowledged.is_none());
    }

    #[test]
    fn test_stale_copy_timer_ignored() {
        let first = update(ViewState::new(), Message::Copied(SlotId::Primary));
        let second = update(first.state, Message::Copied(SlotId::Primary));

        // 最初のタイマーが切れても2回目の表示は残る
        let state = update(second.state, Message::CopyAckExpired(1)).state;
        assert!(state.is_copy_acknowledged(SlotId::Primary));
        let state = update(state, Message::CopyAckExpired(2)).state;
        assert!(!state.is_copy_acknowledged(SlotId::Primary));
    }

    #[test]
    fn test_copy_acknowledgement_is_per_slot() {
        let state = update(ViewState::new(), Message::ToggleComparison).state;
        let state = update(state, Message::Copied(SlotId::Secondary)).state;

        assert!(state.is_copy_acknowledged(SlotId::Secondary));
        assert!(!state.is_copy_acknowledged(SlotId::Primary), "別のSlotの表示は変えない");

        // 後からコピーしたSlotに表示が移る
        let state = update(state, Message::Copied(SlotId::Primary)).state;
        assert!(state.is_copy_acknowledged(SlotId::Primary));
        assert!(!state.is_copy_acknowledged(SlotId::Secondary));
    }

    #[test]
    fn test_rehydrated_view_has_no_stats() {
        let state = update(
            ViewState::new(),
            Message::HistoryLoaded(Ok(vec![entry(1, 0.62)])),
        )
        .state;
        let state = update(state, Message::Rehydrate(1)).state;

        let view = state.view(SlotId::Primary).unwrap();
        assert!(view.result.is_some());
        assert!(view.stats.is_none(), "復元結果の統計は表示しない");
    }

    #[test]
    fn test_slot_view_exposes_stats() {
        let (state, generation) = submit(ViewState::new(), SlotId::Primary, "Hello there friend. This is fine. Words go here ok");
        let state = complete(state, SlotId::Primary, generation, Ok(result(0.85))).state;

        let view = state.view(SlotId::Primary).unwrap();
        assert!(!view.loading);
        assert!(view.error.is_none());
        let stats = view.stats.expect("統計が無い");
        assert_eq!(stats.display_words_per_sentence(), 3.3);
    }
}
