//! Logger setup shared by the Tsudoi binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the binary itself, the server
/// library and `tower_http` log at `default_level`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_filter = format!(
        "{crate_name}={default_level},tsudoi_server={default_level},tower_http={default_level}"
    );

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // A subscriber installed earlier (e.g. by a test harness) stays in place
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
    {
        tracing::warn!(error = %e, "Global tracing subscriber already installed, keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logger_twice_does_not_panic() {
        // テスト項目: 2 回目の呼び出しは既存の subscriber を維持し、panic しない
        setup_logger("tsudoi-test", "debug");
        setup_logger("tsudoi-test", "info");
    }
}
