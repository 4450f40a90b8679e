//! Telegram bot: command dispatch, counters, retry and the polling loop.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ConfigError;
use crate::lookup::{BinLookupClient, BinRecord, LookupError};

pub mod commands;
pub mod reply;
pub mod retry;
pub mod stats;
pub mod telegram;

pub use commands::{parse_command, Command, CommandDispatcher, Request, StatusProbe};
pub use retry::{with_backoff, RetryPolicy};
pub use stats::QueryStats;

/// Source of BIN information for the dispatcher.
#[async_trait]
pub trait BinSource: Send + Sync {
    /// Looks up a normalized BIN.
    async fn lookup(&self, bin: &str) -> Result<BinRecord, LookupError>;

    /// Health check; returns the round-trip latency.
    async fn probe(&self, bin: &str, timeout: Duration) -> Result<Duration, LookupError>;
}

#[async_trait]
impl BinSource for BinLookupClient {
    async fn lookup(&self, bin: &str) -> Result<BinRecord, LookupError> {
        BinLookupClient::lookup(self, bin).await
    }

    async fn probe(&self, bin: &str, timeout: Duration) -> Result<Duration, LookupError> {
        BinLookupClient::probe(self, bin, timeout).await
    }
}

/// Errors that stop the bot process.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The lookup client could not be built.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Telegram API failure that outlived the retry policy.
    #[error("telegram error: {0}")]
    Telegram(String),

    /// The log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}
