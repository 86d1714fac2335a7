//! スコアリングサービスとやり取りする型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ScoreRequest: `POST /api/v1/score` のリクエストボディ
//! - ScoreResult: スコアリング結果（HumanScore + マーカー内訳 + メタデータ）
//! - HistoryEntry: 履歴ストアの1件
//! - HealthStatus: `/health` の応答
//!
//! ワイヤ上のキーはサービス側に合わせてsnake_case（`humanscore`, `sentence_count`）。
//! camelCaseのエイリアスも受け付ける。

use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// マーカー名 → スコア(0-1)
pub type Breakdown = BTreeMap<String, f64>;

/// スコアリングリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    pub options: ScoreOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    #[serde(alias = "includeBreakdown")]
    pub include_breakdown: bool,
}

impl ScoreRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: ScoreOptions {
                include_breakdown: true,
            },
        }
    }
}

/// スコアリング結果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    /// HumanScore（高いほど人間らしい）
    #[serde(rename = "humanscore", alias = "humanScore", alias = "human_score")]
    pub human_score: f64,

    /// マーカー別スコア。既知マーカー以外のキーも保持する
    pub breakdown: Breakdown,

    pub metadata: ScoreMetadata,

    /// 履歴から復元した結果（メタデータはゼロ埋めで信頼できない）
    #[serde(skip)]
    pub reconstructed: bool,
}

/// サービスが返すテキスト統計
///
/// 3つのカウントは必須。欠けていれば形状不正として扱う。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreMetadata {
    #[serde(alias = "sentenceCount")]
    pub sentence_count: u32,

    #[serde(alias = "tokenCount")]
    pub token_count: u32,

    #[serde(alias = "charCount")]
    pub char_count: u32,

    /// マーカー別の詳細（実装依存、マーカーごとに欠けていてもよい）
    #[serde(default, alias = "markerDetails", skip_serializing_if = "BTreeMap::is_empty")]
    pub marker_details: BTreeMap<String, serde_json::Value>,
}

impl ScoreResult {
    /// サービス境界での形状チェック
    ///
    /// スコアは[0,1]、有限値でなければならない。
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !in_unit_range(self.human_score) {
            return Err(ServiceError::InvalidResponse(format!(
                "humanscore out of range: {}",
                self.human_score
            )));
        }

        if let Some((key, value)) = self.breakdown.iter().find(|(_, v)| !in_unit_range(**v)) {
            return Err(ServiceError::InvalidResponse(format!(
                "breakdown `{}` out of range: {}",
                key, value
            )));
        }

        Ok(())
    }
}

fn in_unit_range(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// 履歴ストアの1件（読み取り専用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,

    /// 先頭部分のみ（サーバ側で切り詰め済み）
    #[serde(alias = "textPreview")]
    pub text_preview: String,

    #[serde(rename = "humanscore", alias = "humanScore", alias = "human_score")]
    pub human_score: f64,

    #[serde(default)]
    pub breakdown: Breakdown,

    #[serde(alias = "createdAt", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// `/health` の応答
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// タイムスタンプのデシリアライズ
///
/// サービスはタイムゾーンなしの `2026-01-18T12:34:56.123456` を返すことがあるため、
/// オフセットなしの場合はUTCとして解釈する。
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}
