//! ブラウザでのレポート出力（ダウンロード / クリップボード）

pub mod clipboard;
pub mod download;

use chrono::{DateTime, Utc};

/// 現在時刻（wasmではシステム時計が無いためDate.now()から作る）
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}
