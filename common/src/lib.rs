//! TraceNeuro Common Library
//!
//! CLIとWeb(WASM)で共有されるダッシュボードの中核:
//! Slotコントローラ、派生統計、履歴キャッシュ、ビュー状態マシン、レポート出力

pub mod types;
pub mod error;
pub mod markers;
pub mod metrics;
pub mod report;
pub mod service;
pub mod slot;
pub mod history;
pub mod samples;
pub mod view;
pub mod dashboard;

pub use types::{Breakdown, HealthStatus, HistoryEntry, ScoreMetadata, ScoreRequest, ScoreResult};
pub use error::{Error, Result, ServiceError};
pub use markers::{display_label, ordered_breakdown, MarkerInfo, KNOWN_MARKERS};
pub use metrics::{derive_stats, DerivedStats};
pub use report::{classify, clipboard_text, export_file_name, export_report, serialize, Classification, ReportFormat};
pub use service::{HistoryService, ScoringService};
pub use slot::{Resolution, Slot, SlotId, SlotStatus};
pub use history::{rehydrate, HistoryCache, HISTORY_LIMIT};
pub use samples::SampleKind;
pub use view::{update, Effect, Message, SlotView, Transition, ViewMode, ViewState};
pub use dashboard::Dashboard;
