//! 履歴パネル（直近の結果とプライマリSlotへの復元）

use leptos::prelude::*;
use traceneuro_common::report::percent;
use traceneuro_common::{classify, HistoryEntry, Message};
use crate::app::Dispatcher;

#[component]
pub fn HistoryPanel(dispatcher: Dispatcher) -> impl IntoView {
    let state = dispatcher.state;
    let entries = move || state.with(|s| s.history_entries().to_vec());

    view! {
        <aside class="history-panel">
            <div class="history-header">
                <h2>"Recent analyses"</h2>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click=move |_| dispatcher.dispatch(Message::RefreshHistory)
                >
                    "Refresh"
                </button>
            </div>

            <Show
                when=move || state.with(|s| !s.history.is_empty())
                fallback=|| view! { <p class="text-muted">"No history yet"</p> }
            >
                <ul class="history-list">
                    <For
                        each=entries
                        key=|entry| entry.id
                        children=move |entry: HistoryEntry| {
                            let id = entry.id;
                            view! {
                                <li class="history-item">
                                    <button
                                        class="history-restore"
                                        on:click=move |_| dispatcher.dispatch(Message::Rehydrate(id))
                                    >
                                        <span class="history-score">{percent(entry.human_score)}</span>
                                        <span class="history-class">{classify(entry.human_score)}</span>
                                        <span class="history-date">
                                            {entry.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                        </span>
                                        <p class="history-preview">{entry.text_preview.clone()}</p>
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </aside>
    }
}
