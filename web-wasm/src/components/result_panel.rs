//! 結果表示（スコア・分類・内訳・メタデータ・派生統計）

use leptos::prelude::*;
use traceneuro_common::report::percent;
use traceneuro_common::{display_label, ordered_breakdown, Classification, SlotId};
use crate::app::Dispatcher;
use crate::components::export_buttons::{ExportButtons, ExportButtonsProps};

#[component]
pub fn ResultPanel(dispatcher: Dispatcher, slot: SlotId) -> impl IntoView {
    let state = dispatcher.state;
    let result = move || state.with(|s| s.slot(slot).result().cloned());
    let stats = move || state.with(|s| s.slot(slot).stats());

    move || {
        result().map(|result| {
            let classification = Classification::from_score(result.human_score);
            let breakdown = ordered_breakdown(&result.breakdown)
                .into_iter()
                .map(|(key, value)| {
                    let label = display_label(key).to_string();
                    view! {
                        <li class="marker">
                            <span class="marker-label">{label}</span>
                            <span class="marker-bar">
                                <span class="marker-fill" style=format!("width: {:.0}%", value * 100.0) />
                            </span>
                            <span class="marker-value">{percent(value)}</span>
                        </li>
                    }
                })
                .collect_view();
            let meta = result.metadata.clone();

            view! {
                <div class="result-panel">
                    <div class=format!("score score-{}", classification.as_str())>
                        <span class="score-value">{percent(result.human_score)}</span>
                        <span class="score-label">{classification.label()}</span>
                    </div>

                    {result.reconstructed.then(|| view! {
                        <p class="text-muted">"Restored from history. Metadata unavailable."</p>
                    })}

                    <ul class="breakdown">{breakdown}</ul>

                    <dl class="metadata">
                        <dt>"Sentences"</dt><dd>{meta.sentence_count}</dd>
                        <dt>"Tokens"</dt><dd>{meta.token_count}</dd>
                        <dt>"Characters"</dt><dd>{meta.char_count}</dd>
                    </dl>

                    {move || stats().map(|stats| view! {
                        <dl class="stats">
                            <dt>"Words"</dt><dd>{stats.word_count}</dd>
                            <dt>"Avg words/sentence"</dt><dd>{format!("{:.1}", stats.display_words_per_sentence())}</dd>
                            <dt>"Avg chars/word"</dt><dd>{format!("{:.1}", stats.display_chars_per_word())}</dd>
                            <dt>"Readability (est.)"</dt><dd>{format!("{:.1}", stats.display_readability())}</dd>
                        </dl>
                    })}

                    {ExportButtons(ExportButtonsProps::builder().dispatcher(dispatcher).slot(slot).build())}
                </div>
            }
        })
    }
}
