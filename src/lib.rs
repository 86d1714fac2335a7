//! TraceNeuro CLI
//!
//! スコアリングサービスを呼び出し、結果・内訳・派生統計を端末に表示する。

pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
