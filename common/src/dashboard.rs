//! ダッシュボードの実行ループ
//!
//! `ViewState` を保持し、メッセージを `update` に通して得た副作用をサービス経由で実行する。
//! CLIとテストで使う。ブラウザ版は同じ `update` を使い、副作用を `spawn_local` で実行する。
//!
//! 副作用は並行に実行し、完了したものから順に結果のメッセージを適用する。
//! 比較モードでも片方のSlotの遷移がもう片方の応答を待つことはない。

use crate::service::{HistoryService, ScoringService};
use crate::view::{update, Effect, Message, Transition, ViewState};
use futures::stream::{FuturesUnordered, StreamExt};

pub struct Dashboard<S> {
    service: S,
    state: ViewState,
    refresh_history: bool,
}

impl<S> Dashboard<S>
where
    S: ScoringService + HistoryService,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: ViewState::new(),
            refresh_history: true,
        }
    }

    /// 履歴を表示しないホスト用（`RefreshHistory` を実行しない）
    pub fn without_history_refresh(mut self) -> Self {
        self.refresh_history = false;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// メッセージを処理し、派生したメッセージがなくなるまで続ける
    pub async fn dispatch(&mut self, message: Message) {
        self.dispatch_all([message]).await;
    }

    /// 同時に届いたメッセージとして処理する
    ///
    /// 状態遷移を順に適用し、出てきた副作用を並行実行する。
    /// 比較モードで2つのSlotを同時に送信する場合に使う。
    pub async fn dispatch_all(&mut self, messages: impl IntoIterator<Item = Message>) {
        let service = &self.service;
        let state = &mut self.state;
        let refresh_history = self.refresh_history;
        let mut in_flight = FuturesUnordered::new();

        for message in messages {
            let effects = apply(state, message, refresh_history);
            in_flight.extend(effects.into_iter().map(|e| run_effect(service, e)));
        }

        while let Some(follow_up) = in_flight.next().await {
            if let Some(message) = follow_up {
                let effects = apply(state, message, refresh_history);
                in_flight.extend(effects.into_iter().map(|e| run_effect(service, e)));
            }
        }
    }
}

/// 遷移を適用し、実行する副作用を返す
fn apply(state: &mut ViewState, message: Message, refresh_history: bool) -> Vec<Effect> {
    let Transition { state: next, effects } = update(std::mem::take(state), message);
    *state = next;
    effects
        .into_iter()
        .filter(|effect| {
            let skip = !refresh_history && matches!(effect, Effect::RefreshHistory { .. });
            if skip {
                tracing::debug!("history refresh skipped");
            }
            !skip
        })
        .collect()
}

async fn run_effect<S>(service: &S, effect: Effect) -> Option<Message>
where
    S: ScoringService + HistoryService,
{
    match effect {
        Effect::Score {
            slot,
            generation,
            request,
        } => {
            let outcome = service.score(&request).await;
            if let Err(e) = &outcome {
                tracing::info!(slot = slot.as_str(), error = %e, "scoring failed");
            }
            Some(Message::ScoreCompleted {
                slot,
                generation,
                outcome,
            })
        }
        Effect::RefreshHistory { limit } => Some(Message::HistoryLoaded(service.recent(limit).await)),
        Effect::ScheduleCopyReset { token, .. } => {
            // ネイティブ版にはクリップボード表示が無いので即時に戻す
            Some(Message::CopyAckExpired(token))
        }
    }
}
