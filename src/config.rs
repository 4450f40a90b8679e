//! Bot configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TELEGRAM_BOT_TOKEN` | prompted on a terminal, otherwise required |
//! | `BIN_API_ENDPOINT` | `https://data.handyapi.com/bin` |
//! | `BIN_API_TIMEOUT_SECS` | `10` |
//! | `BIN_STATUS_TIMEOUT_SECS` | `5` |
//! | `BIN_STATUS_PROBE` | `457173` |
//! | `POLL_TIMEOUT_SECS` | `10` |
//! | `RETRY_INITIAL_SECS` | `5` |
//! | `RETRY_MAX_SECS` | `60` |
//! | `RETRY_MAX_ATTEMPTS` | unlimited |
//!
//! `POLL_TIMEOUT_SECS` accepts 1 to 16 so the long poll ends before teloxide's
//! 17 s HTTP request timeout. Retry delays must be at least one second.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;
use std::time::Duration;

use crate::bot::{RetryPolicy, StatusProbe};
use crate::lookup::{normalize_bin, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Longest accepted `getUpdates` long poll, in seconds.
///
/// teloxide's default HTTP client abandons requests after 17 s.
pub const MAX_POLL_TIMEOUT_SECS: u32 = 16;

/// Errors raised while loading [`BotConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// Reading the token from the terminal failed.
    #[error("failed to read token: {0}")]
    Io(#[from] io::Error),
}

/// Everything the bot binary needs to start.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot API token.
    pub token: String,
    /// BIN lookup endpoint.
    pub endpoint: String,
    /// Timeout for `/bin` and `/chk` lookups.
    pub lookup_timeout: Duration,
    /// Probe used by `/status`.
    pub status_probe: StatusProbe,
    /// Long-poll timeout for `getUpdates`, in seconds.
    pub poll_timeout_secs: u32,
    /// Backoff for the receive loop.
    pub retry: RetryPolicy,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("lookup_timeout", &self.lookup_timeout)
            .field("status_probe", &self.status_probe)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl BotConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let token = match env_str("TELEGRAM_BOT_TOKEN") {
            Some(token) => token,
            None if io::stdin().is_terminal() => prompt_token()?,
            None => return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN")),
        };

        Self::from_lookup(token, env_str)
    }

    /// Builds a configuration from `token` and a variable lookup function.
    pub fn from_lookup<F>(token: String, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if token.trim().is_empty() {
            return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
        }

        let endpoint = lookup("BIN_API_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        let lookup_timeout = Duration::from_secs(
            parse_var(&lookup, "BIN_API_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT.as_secs()),
        );

        let probe_bin = match lookup("BIN_STATUS_PROBE") {
            Some(raw) => normalize_bin(&raw).ok_or(ConfigError::Invalid {
                name: "BIN_STATUS_PROBE",
                value: raw,
            })?,
            None => StatusProbe::default().bin,
        };
        let probe_timeout = Duration::from_secs(
            parse_var(&lookup, "BIN_STATUS_TIMEOUT_SECS")?.unwrap_or(5),
        );

        let poll_timeout_secs = match parse_var::<u32, _>(&lookup, "POLL_TIMEOUT_SECS")? {
            Some(secs) if !(1..=MAX_POLL_TIMEOUT_SECS).contains(&secs) => {
                return Err(ConfigError::Invalid {
                    name: "POLL_TIMEOUT_SECS",
                    value: secs.to_string(),
                })
            }
            Some(secs) => secs,
            None => 10,
        };

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            initial: positive_secs(&lookup, "RETRY_INITIAL_SECS")?.unwrap_or(defaults.initial),
            max_delay: positive_secs(&lookup, "RETRY_MAX_SECS")?.unwrap_or(defaults.max_delay),
            max_attempts: parse_var(&lookup, "RETRY_MAX_ATTEMPTS")?,
        };

        Ok(Self {
            token: token.trim().to_owned(),
            endpoint,
            lookup_timeout,
            status_probe: StatusProbe {
                bin: probe_bin,
                timeout: probe_timeout,
            },
            poll_timeout_secs,
            retry,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

/// Like [`parse_var`] for a whole number of seconds, rejecting zero.
fn positive_secs<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<u64, _>(lookup, name)? {
        Some(0) => Err(ConfigError::Invalid {
            name,
            value: "0".to_owned(),
        }),
        secs => Ok(secs.map(Duration::from_secs)),
    }
}

fn prompt_token() -> Result<String, ConfigError> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter your Telegram bot token:\n> ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let token = line.trim().to_owned();
    if token.is_empty() {
        return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = BotConfig::from_lookup("123:abc".into(), vars(&[])).unwrap();
        assert_eq!(cfg.token, "123:abc");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.lookup_timeout, Duration::from_secs(10));
        assert_eq!(cfg.status_probe, StatusProbe::default());
        assert_eq!(cfg.poll_timeout_secs, 10);
        assert_eq!(cfg.retry, RetryPolicy::default());
    }

    #[test]
    fn overrides() {
        let cfg = BotConfig::from_lookup(
            "t".into(),
            vars(&[
                ("BIN_API_ENDPOINT", "http://localhost:8080/bin"),
                ("BIN_API_TIMEOUT_SECS", "3"),
                ("BIN_STATUS_TIMEOUT_SECS", "2"),
                ("BIN_STATUS_PROBE", "550000"),
                ("POLL_TIMEOUT_SECS", "16"),
                ("RETRY_INITIAL_SECS", "1"),
                ("RETRY_MAX_SECS", " 8 "),
                ("RETRY_MAX_ATTEMPTS", "4"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.endpoint, "http://localhost:8080/bin");
        assert_eq!(cfg.lookup_timeout, Duration::from_secs(3));
        assert_eq!(cfg.status_probe.bin, "550000");
        assert_eq!(cfg.status_probe.timeout, Duration::from_secs(2));
        assert_eq!(cfg.poll_timeout_secs, 16);
        assert_eq!(
            cfg.retry,
            RetryPolicy {
                initial: Duration::from_secs(1),
                max_delay: Duration::from_secs(8),
                max_attempts: Some(4),
            }
        );
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = BotConfig::from_lookup("t".into(), vars(&[("BIN_API_TIMEOUT_SECS", "ten")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name: "BIN_API_TIMEOUT_SECS", .. }
        ));

        let err = BotConfig::from_lookup("t".into(), vars(&[("RETRY_MAX_ATTEMPTS", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "RETRY_MAX_ATTEMPTS", .. }));
    }

    #[test]
    fn poll_timeout_must_fit_client_timeout() {
        for value in ["0", "17", "60"] {
            let err = BotConfig::from_lookup("t".into(), vars(&[("POLL_TIMEOUT_SECS", value)]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: "POLL_TIMEOUT_SECS", .. }),
                "{value}"
            );
        }

        let cfg = BotConfig::from_lookup("t".into(), vars(&[("POLL_TIMEOUT_SECS", "1")])).unwrap();
        assert_eq!(cfg.poll_timeout_secs, 1);
    }

    #[test]
    fn zero_retry_delays_are_rejected() {
        let err = BotConfig::from_lookup("t".into(), vars(&[("RETRY_INITIAL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "RETRY_INITIAL_SECS", .. }));

        let err = BotConfig::from_lookup("t".into(), vars(&[("RETRY_MAX_SECS", " 0 ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "RETRY_MAX_SECS", .. }));
    }

    #[test]
    fn invalid_probe_bin() {
        let err = BotConfig::from_lookup("t".into(), vars(&[("BIN_STATUS_PROBE", "12ab")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BIN_STATUS_PROBE", .. }));
    }

    #[test]
    fn blank_token_is_missing() {
        assert!(matches!(
            BotConfig::from_lookup("  ".into(), vars(&[])),
            Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = BotConfig::from_lookup("secret-token".into(), vars(&[])).unwrap();
        assert!(!format!("{cfg:?}").contains("secret-token"));
    }
}
