//! Tracing subscriber setup

use crate::error::{Result, RuntimeError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "rescue_runtime=info,rescue_core=info";

/// Install the global subscriber
///
/// The filter comes from `RUST_LOG` when set. Records emitted through the
/// `log` facade by `rescue-core` are forwarded to the same subscriber.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    Ok(())
}
