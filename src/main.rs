use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use traceneuro::{cli, client, config, display, error, export, logging};
use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use error::{Result, TraceNeuroError};
use traceneuro_common::{
    Dashboard, HistoryService, Message, ReportFormat, SampleKind, ServiceError, SlotId,
    SlotStatus, HISTORY_LIMIT,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url());
    tracing::debug!(api_url = %api_url, "configuration loaded");

    match cli.command {
        Commands::Score { input, text, compare, sample, format, export } => {
            let primary_text = read_input(input.as_deref(), text, sample)?;
            let secondary_text = compare
                .as_deref()
                .map(std::fs::read_to_string)
                .transpose()?;

            let client = ApiClient::new(&api_url, Duration::from_secs(config.timeout_seconds))?;
            // scoreコマンドは履歴を表示しない
            let mut dashboard = Dashboard::new(client).without_history_refresh();

            let mut messages = Vec::new();
            if secondary_text.is_some() {
                messages.push(Message::ToggleComparison);
            }
            messages.push(Message::TextChanged { slot: SlotId::Primary, text: primary_text });
            messages.push(Message::Submit(SlotId::Primary));
            if let Some(text) = secondary_text {
                messages.push(Message::TextChanged { slot: SlotId::Secondary, text });
                messages.push(Message::Submit(SlotId::Secondary));
            }

            let spinner = spinner("Analyzing...");
            dashboard.dispatch_all(messages).await;
            spinner.finish_and_clear();

            let state = dashboard.state();
            let comparison = state.comparison_enabled();
            let export_dir = export.or_else(|| config.export_dir.clone());
            let generated_at = chrono::Utc::now();

            for slot in [SlotId::Primary, SlotId::Secondary] {
                let Some(view) = state.view(slot) else { continue };

                if comparison {
                    println!("== {} ==", slot.as_str());
                }
                print!("{}", display::render_slot(&view, format)?);

                if let (Some(dir), Some(result)) = (&export_dir, view.result) {
                    for path in export::export_results(result, dir, generated_at, slot)? {
                        println!("✔ 出力: {}", path.display());
                    }
                }
            }

            if state.primary.status() == SlotStatus::Failed {
                let message = state.primary.error().unwrap_or_default().to_string();
                return Err(TraceNeuroError::AnalysisFailed(message));
            }
        }

        Commands::History { show, format } => {
            let client = ApiClient::new(&api_url, Duration::from_secs(config.timeout_seconds))?;

            match show {
                Some(id) => {
                    let entry = client.history_entry(id).await.map_err(|e| match e {
                        ServiceError::Status(404) => TraceNeuroError::HistoryNotFound(id),
                        other => other.into(),
                    })?;

                    // 履歴からの復元はビュー状態マシン経由で行う
                    let mut dashboard = Dashboard::new(client);
                    dashboard
                        .dispatch_all([
                            Message::HistoryLoaded(Ok(vec![entry])),
                            Message::Rehydrate(id),
                        ])
                        .await;

                    if let Some(view) = dashboard.state().view(SlotId::Primary) {
                        print!("{}", display::render_slot(&view, format)?);
                    }
                }
                None => {
                    let entries = client.recent(HISTORY_LIMIT).await?;
                    match format {
                        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                        ReportFormat::Text => print!("{}", display::render_history(&entries)),
                    }
                }
            }
        }

        Commands::Health => {
            let client = ApiClient::new(&api_url, Duration::from_secs(config.timeout_seconds))?;
            let health = client.health().await?;
            if health.is_healthy() {
                println!("✔ {} {} ({})", health.service, health.version, client.base_url());
            } else {
                println!("⚠ {}: {}", client.base_url(), health.status);
            }
        }

        Commands::Sample { kind } => {
            println!("{}", kind.text());
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let mut config = config;
            let changed = set_api_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIのURLを設定しました: {}", config.api_base_url);
            }

            if let Some(seconds) = set_timeout {
                config.timeout_seconds = seconds;
                println!("✔ タイムアウトを設定しました: {}秒", seconds);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  API URL: {}", config.api_base_url);
                println!("  実効URL: {}", api_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  エクスポート先: {}",
                    config
                        .export_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
            }
        }
    }

    Ok(())
}

/// 入力テキストを取得（ファイル / --text / --sample / 標準入力）
fn read_input(input: Option<&Path>, text: Option<String>, sample: Option<SampleKind>) -> Result<String> {
    if let Some(kind) = sample {
        return Ok(kind.text().to_string());
    }
    if let Some(text) = text {
        return Ok(text);
    }
    match input {
        Some(path) => {
            if !path.exists() {
                return Err(TraceNeuroError::FileNotFound(path.display().to_string()));
            }
            Ok(std::fs::read_to_string(path)?)
        }
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
