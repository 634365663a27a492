//! Logger initialization — `tracing` with an env-filter directive.
//!
//! `RUST_LOG` takes precedence over the configured level so a run can be
//! made chattier without touching the config file.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber at `level` (an env-filter directive,
/// e.g. `"info"` or `"tellerkit=debug"`).
///
/// May only be called once per process.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logger(format!("invalid log filter {level:?}: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logger(format!("subscriber install failed: {e}")))
}
