//! Chat command parsing and dispatch.

use std::sync::Arc;
use std::time::Duration;

use crate::bot::reply;
use crate::bot::stats::{QueryStats, UserKey};
use crate::bot::BinSource;
use crate::check::{check_card, CheckReport};
use crate::lookup::normalize_bin;

/// Commands the bot answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/info`
    Info,
    /// `/status`
    Status,
    /// `/bin <digits>`
    Bin,
    /// `/chk NUMBER|MM|YYYY|CVV`
    Chk,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "info" => Some(Self::Info),
            "status" => Some(Self::Status),
            "bin" => Some(Self::Bin),
            "chk" => Some(Self::Chk),
            _ => None,
        }
    }
}

/// Splits `/cmd@botname args` into a known command and its trimmed arguments.
///
/// Returns `None` for plain text and unknown commands.
pub fn parse_command(text: &str) -> Option<(Command, String)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim().to_string();

    let name = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    Command::from_name(&name).map(|cmd| (cmd, rest))
}

/// Known BIN and timeout used by `/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusProbe {
    /// BIN to look up.
    pub bin: String,
    /// Timeout for the probe request.
    pub timeout: Duration,
}

impl Default for StatusProbe {
    fn default() -> Self {
        Self {
            bin: "457173".to_owned(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// A command with its arguments already validated.
///
/// The card payload of `/chk` is checked here, once, against a single clock
/// reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `/start` or `/help`
    Usage,
    /// `/info`
    Info,
    /// `/status`
    Status,
    /// `/bin`, with the normalized BIN or `None` when the argument is unusable
    Bin(Option<String>),
    /// `/chk`, with the report or `None` when the payload is malformed
    Chk(Option<CheckReport>),
}

impl Request {
    /// Validates the arguments of `cmd`.
    pub fn new(cmd: Command, args: &str) -> Self {
        match cmd {
            Command::Start | Command::Help => Self::Usage,
            Command::Info => Self::Info,
            Command::Status => Self::Status,
            Command::Bin => Self::Bin(normalize_bin(args)),
            Command::Chk => Self::Chk(check_card(args).ok()),
        }
    }

    /// The command this request answers.
    pub fn command(&self) -> Command {
        match self {
            Self::Usage => Command::Help,
            Self::Info => Command::Info,
            Self::Status => Command::Status,
            Self::Bin(_) => Command::Bin,
            Self::Chk(_) => Command::Chk,
        }
    }

    /// Whether answering will call the BIN service.
    ///
    /// The transport sends a typing indicator first for these.
    pub fn needs_network(&self) -> bool {
        match self {
            Self::Status => true,
            Self::Bin(bin) => bin.is_some(),
            Self::Chk(report) => report.is_some(),
            Self::Usage | Self::Info => false,
        }
    }
}

/// Turns incoming commands into HTML replies.
pub struct CommandDispatcher {
    source: Arc<dyn BinSource>,
    stats: Arc<QueryStats>,
    probe: StatusProbe,
}

impl CommandDispatcher {
    /// Creates a dispatcher over a BIN source and a shared counter store.
    pub fn new(source: Arc<dyn BinSource>, stats: Arc<QueryStats>, probe: StatusProbe) -> Self {
        Self {
            source,
            stats,
            probe,
        }
    }

    /// The shared counter store.
    pub fn stats(&self) -> &Arc<QueryStats> {
        &self.stats
    }

    /// Parses and answers a message. `None` means the message is ignored.
    pub async fn handle(&self, user: UserKey, text: &str) -> Option<String> {
        let (cmd, args) = parse_command(text)?;
        Some(self.dispatch(user, cmd, &args).await)
    }

    /// Answers an already parsed command.
    pub async fn dispatch(&self, user: UserKey, cmd: Command, args: &str) -> String {
        self.answer(user, Request::new(cmd, args)).await
    }

    /// Answers a prepared request.
    pub async fn answer(&self, user: UserKey, request: Request) -> String {
        tracing::debug!(user, command = ?request.command(), "dispatching command");
        match request {
            Request::Usage => reply::welcome(),
            Request::Info => reply::info(),
            Request::Status => self.status().await,
            Request::Bin(bin) => self.bin(user, bin).await,
            Request::Chk(report) => self.chk(user, report).await,
        }
    }

    async fn status(&self) -> String {
        match self.source.probe(&self.probe.bin, self.probe.timeout).await {
            Ok(latency) => reply::status_up(latency),
            Err(err) => {
                tracing::warn!(error = %err, "status probe failed");
                reply::status_down(&err)
            }
        }
    }

    async fn bin(&self, user: UserKey, bin: Option<String>) -> String {
        let Some(bin) = bin else {
            return reply::bin_usage();
        };

        match self.source.lookup(&bin).await {
            Ok(record) => {
                let count = self.stats.record(user);
                tracing::info!(user, bin = %bin, count, "BIN lookup answered");
                reply::bin_reply(&record, count)
            }
            Err(err) => {
                tracing::info!(user, bin = %bin, error = %err, "BIN lookup failed");
                reply::lookup_failure(&err)
            }
        }
    }

    async fn chk(&self, user: UserKey, report: Option<CheckReport>) -> String {
        let Some(report) = report else {
            return reply::chk_usage();
        };

        let count = self.stats.record(user);
        let lookup = self.source.lookup(report.bin()).await;
        tracing::info!(
            user,
            card = %report.masked(),
            luhn = report.passes_luhn(),
            expired = report.expired(),
            count,
            "card check answered"
        );
        reply::check_reply(&report, Some(&lookup), count)
    }
}
