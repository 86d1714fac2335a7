//! スコアリングAPIクライアント（fetch）
//!
//! ステータス/ボディの検証はCLIと同じ `traceneuro_common::service` の関数を使う。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use traceneuro_common::service::{decode_history, decode_score, endpoint, history_url, SCORE_PATH};
use traceneuro_common::{
    HistoryEntry, HistoryService, ScoreRequest, ScoreResult, ScoringService, ServiceError,
};

/// ビルド時に `TRACENEURO_API_URL` で上書きできる
pub const API_BASE_URL: &str = match option_env!("TRACENEURO_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// fetchを実行し、ステータスとボディを返す
    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<(u16, String), ServiceError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(transport)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| ServiceError::Transport("window is not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp_value.dyn_into().map_err(transport)?;

        let text = JsFuture::from(resp.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        Ok((resp.status(), text.as_string().unwrap_or_default()))
    }
}

/// fetchの失敗（CORSやネットワーク断）はTypeErrorとして届く
fn transport(value: JsValue) -> ServiceError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    ServiceError::Transport(message)
}

impl ScoringService for ApiClient {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ServiceError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let (status, text) = self
            .send("POST", &endpoint(&self.base_url, SCORE_PATH), Some(body))
            .await?;
        decode_score(status, &text)
    }
}

impl HistoryService for ApiClient {
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, ServiceError> {
        let (status, text) = self
            .send("GET", &history_url(&self.base_url, limit), None)
            .await?;
        decode_history(status, &text)
    }
}
