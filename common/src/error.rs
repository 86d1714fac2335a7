//! エラー型定義

use thiserror::Error;

/// スコアリング/履歴サービス呼び出しのエラー
///
/// Slotの境界で文字列に変換され、それより外には伝播しない。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// ネットワーク到達不能など、HTTPレスポンスが得られなかった
    #[error("{0}")]
    Transport(String),

    /// 2xx以外のステータス
    #[error("HTTP status {0}")]
    Status(u16),

    /// 200だがボディの形が不正（トランスポート扱い）
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Slotに表示するエラーメッセージ
    ///
    /// ステータスエラーは汎用メッセージ、それ以外は下位のメッセージをそのまま使う。
    pub fn slot_message(&self) -> String {
        match self {
            ServiceError::Status(_) => SCORING_FAILED.to_string(),
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    SCORING_FAILED.to_string()
                } else {
                    message
                }
            }
        }
    }
}

/// 非2xx応答時の汎用メッセージ
pub const SCORING_FAILED: &str = "Scoring failed";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
