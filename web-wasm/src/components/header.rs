//! ヘッダーコンポーネント（表示切替とサンプル読み込み）

use leptos::prelude::*;
use traceneuro_common::{Message, SampleKind};
use crate::app::Dispatcher;

#[component]
pub fn Header(dispatcher: Dispatcher) -> impl IntoView {
    let state = dispatcher.state;

    view! {
        <header class="header">
            <h1>"TraceNeuro"</h1>
            <p class="subtitle">"Text authenticity scoring"</p>

            <div class="toolbar">
                <button
                    class="btn btn-secondary"
                    class:active=move || state.with(|s| s.comparison_enabled())
                    on:click=move |_| dispatcher.dispatch(Message::ToggleComparison)
                >
                    {move || if state.with(|s| s.comparison_enabled()) { "Single view" } else { "Compare" }}
                </button>

                <button
                    class="btn btn-secondary"
                    class:active=move || state.with(|s| s.history_visible)
                    on:click=move |_| dispatcher.dispatch(Message::ToggleHistory)
                >
                    "History"
                </button>

                <button
                    class="btn btn-tertiary"
                    on:click=move |_| dispatcher.dispatch(Message::ToggleDarkMode)
                >
                    {move || if state.with(|s| s.dark_mode) { "Light" } else { "Dark" }}
                </button>

                <span class="sample-buttons">
                    {[SampleKind::Human, SampleKind::Ai]
                        .into_iter()
                        .map(move |kind| view! {
                            <button
                                class="btn btn-small"
                                on:click=move |_| dispatcher.dispatch(Message::LoadSample(kind))
                            >
                                {kind.label()}
                            </button>
                        })
                        .collect_view()}
                </span>
            </div>
        </header>
    }
}
