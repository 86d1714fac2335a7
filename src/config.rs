use crate::error::{TraceNeuroError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// ベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "TRACENEURO_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    /// エクスポート先の既定ディレクトリ
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            timeout_seconds: 30,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TraceNeuroError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("traceneuro").join("config.json"))
    }

    /// 実際に使うベースURL
    pub fn api_url(&self) -> String {
        // 環境変数を優先
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_base_url.clone(),
        }
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TraceNeuroError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }
}
