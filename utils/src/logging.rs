//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise `default_level` (e.g.
/// `"info"` or the daemon's `--log-level` flag) is used as the filter. With
/// `json` set, log lines are emitted as JSON objects instead of plain text.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing("info", false);
        init_tracing("debug", true);
        tracing::info!("still alive");
    }
}
