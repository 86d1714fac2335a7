//! メインアプリケーションコンポーネント
//!
//! 画面の状態は `ViewState` 1つだけで、変更はすべて `update` を通す。
//! `update` が返した副作用はここで実行する（通信は `spawn_local`、タイマーは gloo）。

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo::timers::callback::Timeout;
use traceneuro_common::{
    update, Effect, HistoryService, Message, ScoringService, SlotId, Transition, ViewState,
};
use crate::api::client::{ApiClient, API_BASE_URL};
use crate::components::{
    header::Header,
    history_panel::HistoryPanel,
    slot_panel::{SlotPanel, SlotPanelProps},
};
use crate::log;

/// 状態とAPIクライアントへのハンドル（コンポーネント間で共有する）
#[derive(Clone, Copy)]
pub struct Dispatcher {
    pub state: RwSignal<ViewState>,
    client: StoredValue<ApiClient>,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: RwSignal::new(ViewState::new()),
            client: StoredValue::new(client),
        }
    }

    /// メッセージを適用し、出てきた副作用を開始する
    pub fn dispatch(self, message: Message) {
        let mut effects = Vec::new();
        self.state.update(|state| {
            let Transition { state: next, effects: produced } = update(std::mem::take(state), message);
            *state = next;
            effects = produced;
        });

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect) {
        match effect {
            Effect::Score { slot, generation, request } => {
                let client = self.client.get_value();
                spawn_local(async move {
                    let outcome = client.score(&request).await;
                    if let Err(e) = &outcome {
                        log::warn(&format!("{} scoring failed: {}", slot.as_str(), e));
                    }
                    self.dispatch(Message::ScoreCompleted { slot, generation, outcome });
                });
            }
            Effect::RefreshHistory { limit } => {
                let client = self.client.get_value();
                spawn_local(async move {
                    let outcome = client.recent(limit).await;
                    self.dispatch(Message::HistoryLoaded(outcome));
                });
            }
            Effect::ScheduleCopyReset { token, after } => {
                let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
                Timeout::new(millis, move || self.dispatch(Message::CopyAckExpired(token))).forget();
            }
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let dispatcher = Dispatcher::new(ApiClient::new(API_BASE_URL));
    log::debug(&format!("scoring service: {}", API_BASE_URL));

    let state = dispatcher.state;

    view! {
        <div class="container" class:dark=move || state.with(|s| s.dark_mode)>
            <Header dispatcher=dispatcher />

            <div class="slots" class:comparison=move || state.with(|s| s.comparison_enabled())>
                {SlotPanel(SlotPanelProps::builder().dispatcher(dispatcher).slot(SlotId::Primary).build())}

                <Show when=move || state.with(|s| s.comparison_enabled())>
                    {SlotPanel(SlotPanelProps::builder().dispatcher(dispatcher).slot(SlotId::Secondary).build())}
                </Show>
            </div>

            <Show when=move || state.with(|s| s.history_visible)>
                <HistoryPanel dispatcher=dispatcher />
            </Show>
        </div>
    }
}
