//! 外部サービスとの境界
//!
//! スコアリング/履歴サービスをトレイトで抽象化する。
//! CLIは reqwest、Web(WASM)は fetch で実装し、テストではスタブを使う。
//! レスポンスの検証（ステータス/形状）は両実装で共通の関数を使う。

use crate::error::ServiceError;
use crate::types::{HistoryEntry, ScoreRequest, ScoreResult};

pub const SCORE_PATH: &str = "/api/v1/score";
pub const HISTORY_PATH: &str = "/api/v1/history";
pub const HEALTH_PATH: &str = "/health";

/// スコアリングサービス
///
/// 単一スレッドの協調スケジューリングを前提とする（WASMで `Send` にならないため）。
#[allow(async_fn_in_trait)]
pub trait ScoringService {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ServiceError>;
}

/// 履歴サービス（新しい順）
#[allow(async_fn_in_trait)]
pub trait HistoryService {
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, ServiceError>;
}

/// ベースURLとパスを結合
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub fn history_url(base_url: &str, limit: usize) -> String {
    format!("{}?limit={}", endpoint(base_url, HISTORY_PATH), limit)
}

pub fn history_entry_url(base_url: &str, id: i64) -> String {
    format!("{}/{}", endpoint(base_url, HISTORY_PATH), id)
}

/// スコアリング応答をデコード
///
/// 2xx以外は `Status`、ボディの形が不正なら `InvalidResponse`。
pub fn decode_score(status: u16, body: &str) -> Result<ScoreResult, ServiceError> {
    ensure_success(status)?;
    let result: ScoreResult =
        serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
    result.validate()?;
    Ok(result)
}

/// 履歴応答をデコード
pub fn decode_history(status: u16, body: &str) -> Result<Vec<HistoryEntry>, ServiceError> {
    ensure_success(status)?;
    serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

/// 履歴1件の応答をデコード
pub fn decode_history_entry(status: u16, body: &str) -> Result<HistoryEntry, ServiceError> {
    ensure_success(status)?;
    serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

fn ensure_success(status: u16) -> Result<(), ServiceError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ServiceError::Status(status))
    }
}
