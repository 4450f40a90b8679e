//! Log subscriber setup for the bot binary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::bot::BotError;

/// Installs a formatted log subscriber.
///
/// `RUST_LOG` overrides the default of `info` for this crate and `service`,
/// `warn` for everything else.
pub fn init(service: &str) -> Result<(), BotError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,binchecker=info,{service}=info")));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| BotError::Logging(err.to_string()))
}
