//! スコアリングAPIクライアント（reqwest）
//!
//! ステータス/ボディの検証は `traceneuro_common::service` の共通関数で行う。

use crate::error::Result;
use std::time::Duration;
use traceneuro_common::service::{
    decode_history, decode_history_entry, decode_score, endpoint, history_entry_url, history_url,
    HEALTH_PATH, SCORE_PATH,
};
use traceneuro_common::{
    HealthStatus, HistoryEntry, HistoryService, ScoreRequest, ScoreResult, ScoringService,
    ServiceError,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/health`
    pub async fn health(&self) -> std::result::Result<HealthStatus, ServiceError> {
        let url = endpoint(&self.base_url, HEALTH_PATH);
        let (status, body) = self.get(&url).await?;
        if !(200..300).contains(&status) {
            return Err(ServiceError::Status(status));
        }
        serde_json::from_str(&body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    /// `/api/v1/history/{id}`
    pub async fn history_entry(&self, id: i64) -> std::result::Result<HistoryEntry, ServiceError> {
        let (status, body) = self.get(&history_entry_url(&self.base_url, id)).await?;
        decode_history_entry(status, &body)
    }

    async fn get(&self, url: &str) -> std::result::Result<(u16, String), ServiceError> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send().await.map_err(transport)?;
        read_body(response).await
    }
}

fn transport(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport(e.to_string())
}

async fn read_body(response: reqwest::Response) -> std::result::Result<(u16, String), ServiceError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport)?;
    tracing::debug!(status, bytes = body.len(), "response received");
    Ok((status, body))
}

impl ScoringService for ApiClient {
    async fn score(&self, request: &ScoreRequest) -> std::result::Result<ScoreResult, ServiceError> {
        let url = endpoint(&self.base_url, SCORE_PATH);
        tracing::debug!(url = %url, chars = request.text.chars().count(), "POST score");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        let (status, body) = read_body(response).await?;
        decode_score(status, &body)
    }
}

impl HistoryService for ApiClient {
    async fn recent(&self, limit: usize) -> std::result::Result<Vec<HistoryEntry>, ServiceError> {
        let (status, body) = self.get(&history_url(&self.base_url, limit)).await?;
        decode_history(status, &body)
    }
}
