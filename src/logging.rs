//! tracingによるログ設定
//!
//! ログは標準エラーに出す（標準出力はレポート用）。
//! レベルは `TRACENEURO_LOG` で上書きできる。
//!
//! ```bash
//! TRACENEURO_LOG=debug traceneuro score input.txt
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "TRACENEURO_LOG";

pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "traceneuro=debug,traceneuro_common=debug,warn"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // テストなどで二重に初期化されても落とさない
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .try_init();
}
