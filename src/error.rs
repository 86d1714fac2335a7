use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceNeuroError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPクライアントエラー: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("サービスエラー: {0}")]
    Service(#[from] traceneuro_common::ServiceError),

    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error("履歴が見つかりません: id={0}")]
    HistoryNotFound(i64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] traceneuro_common::Error),
}

pub type Result<T> = std::result::Result<T, TraceNeuroError>;
