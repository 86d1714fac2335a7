//! 入力パネル（1 Slot分）

use leptos::prelude::*;
use traceneuro_common::{Message, SlotId};
use crate::app::Dispatcher;
use crate::components::result_panel::{ResultPanel, ResultPanelProps};

#[component]
pub fn SlotPanel(dispatcher: Dispatcher, slot: SlotId) -> impl IntoView {
    let state = dispatcher.state;
    let loading = move || state.with(|s| s.slot(slot).is_pending());
    let error = move || state.with(|s| s.slot(slot).error().map(str::to_string));

    view! {
        <section class="slot-panel" data-slot=slot.as_str()>
            <textarea
                class="text-input"
                placeholder="Paste at least 10 characters of text to score..."
                prop:value=move || state.with(|s| s.slot(slot).text().to_string())
                on:input=move |ev| {
                    dispatcher.dispatch(Message::TextChanged {
                        slot,
                        text: event_target_value(&ev),
                    });
                }
            />

            <div class="slot-actions">
                <button
                    class="btn btn-primary"
                    disabled=loading
                    on:click=move |_| dispatcher.dispatch(Message::Submit(slot))
                >
                    {move || if loading() { "Analyzing..." } else { "Analyze" }}
                </button>
                <button
                    class="btn btn-tertiary"
                    on:click=move |_| dispatcher.dispatch(Message::Clear(slot))
                >
                    "Clear"
                </button>
            </div>

            {move || error().map(|message| view! { <p class="error">{message}</p> })}

            {ResultPanel(ResultPanelProps::builder().dispatcher(dispatcher).slot(slot).build())}
        </section>
    }
}
