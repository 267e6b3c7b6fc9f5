//! Logging setup utilities for the Quizroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crate that owns the binary as well as the
/// binary itself. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The owning crate (e.g., `env!("CARGO_PKG_NAME")`)
/// * `binary_name` - The name of the binary (e.g., `env!("CARGO_BIN_NAME")`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use quizroom_shared::logger::setup_logger;
///
/// setup_logger("quizroom-server", "quizroom-server", "info");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Cargo names use `-`, tracing targets use `_`, so both are normalized.
pub fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},quizroom_shared={}",
        crate_name.replace('-', "_"),
        level,
        binary_name.replace('-', "_"),
        level,
        level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_names() {
        // テスト項目: クレート名・バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let crate_name = "quizroom-server";
        let binary_name = "quizroom-server";

        // when (操作):
        let filter = default_filter(crate_name, binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "quizroom_server=debug,quizroom_server=debug,quizroom_shared=debug"
        );
    }
}
