//! エクスポートボタンコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use traceneuro_common::{clipboard_text, export_file_name, export_report, Message, ReportFormat, SlotId};
use crate::app::Dispatcher;
use crate::export::{clipboard, download, now_utc};
use crate::log;

#[component]
pub fn ExportButtons(dispatcher: Dispatcher, slot: SlotId) -> impl IntoView {
    let state = dispatcher.state;
    let current = move || state.with_untracked(|s| s.slot(slot).result().cloned());

    let on_download = move |format: ReportFormat| {
        let Some(result) = current() else { return };
        let generated_at = now_utc();
        let outcome = export_report(&result, format, generated_at)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                download::download_text(&content, &export_file_name(format, generated_at), format.mime_type())
                    .map_err(|e| format!("{:?}", e))
            });
        if let Err(e) = outcome {
            log::warn(&format!("export failed: {}", e));
        }
    };

    let on_copy = move |_| {
        let Some(result) = current() else { return };
        let text = clipboard_text(&result);
        spawn_local(async move {
            match clipboard::write_text(&text).await {
                Ok(()) => dispatcher.dispatch(Message::Copied(slot)),
                Err(e) => log::warn(&format!("clipboard write failed: {:?}", e)),
            }
        });
    };

    view! {
        <div class="export-buttons">
            <button class="btn btn-secondary" on:click=move |_| on_download(ReportFormat::Json)>
                "JSON"
            </button>
            <button class="btn btn-secondary" on:click=move |_| on_download(ReportFormat::Text)>
                "Text"
            </button>
            <button class="btn btn-secondary" on:click=on_copy>
                {move || if state.with(|s| s.is_copy_acknowledged(slot)) { "Copied!" } else { "Copy" }}
            </button>
        </div>
    }
}
