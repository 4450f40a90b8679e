//! Telegram BIN checker bot.
//!
//! ```bash
//! TELEGRAM_BOT_TOKEN=123:abc RUST_LOG=binchecker=debug binchecker-bot
//! ```

use std::sync::Arc;

use binchecker::bot::telegram::{run_polling, PollSettings};
use binchecker::bot::{BotError, CommandDispatcher, QueryStats};
use binchecker::config::BotConfig;
use binchecker::logging;
use binchecker::lookup::BinLookupClient;
use teloxide::Bot;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    logging::init("binchecker_bot")?;

    let cfg = BotConfig::load()?;
    tracing::debug!(config = ?cfg, "configuration loaded");

    let client = BinLookupClient::builder()
        .endpoint(cfg.endpoint.clone())
        .timeout(cfg.lookup_timeout)
        .user_agent(concat!("binchecker/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let dispatcher = Arc::new(CommandDispatcher::new(
        Arc::new(client),
        Arc::new(QueryStats::new()),
        cfg.status_probe.clone(),
    ));

    let settings = PollSettings {
        poll_timeout_secs: cfg.poll_timeout_secs,
        retry: cfg.retry,
    };

    run_polling(Bot::new(cfg.token.clone()), dispatcher, settings).await
}
