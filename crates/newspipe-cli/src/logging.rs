//! Tracing setup: console output always, plus an optional log file that
//! captures the same events without ANSI colors.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured `level` unless the user
/// asked for a level explicitly (`level_is_explicit`), in which case the
/// flag wins. When `log_file` is given, it is opened in append mode so
/// consecutive runs accumulate.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(level: &str, level_is_explicit: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(level, level_is_explicit, rust_log.as_deref());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// Pick the filter directives: an explicitly requested level always wins;
/// otherwise `RUST_LOG` applies when set, then the configured default.
fn build_filter(level: &str, level_is_explicit: bool, rust_log: Option<&str>) -> EnvFilter {
    if level_is_explicit {
        return EnvFilter::new(level);
    }
    match rust_log {
        Some(spec) if !spec.is_empty() => EnvFilter::new(spec),
        _ => EnvFilter::new(level),
    }
}
