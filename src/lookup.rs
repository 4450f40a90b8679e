//! Client for the external BIN lookup HTTP API.
//!
//! A lookup is `GET {endpoint}/{bin}` with a bounded timeout. The API answers
//! with a JSON body whose `Status` field is `SUCCESS` on a hit:
//!
//! ```json
//! {
//!   "Status": "SUCCESS",
//!   "Scheme": "VISA",
//!   "Type": "CREDIT",
//!   "Issuer": "JPMORGAN CHASE BANK N.A.",
//!   "CardTier": "CLASSIC",
//!   "Country": { "A2": "US", "Name": "United States" }
//! }
//! ```
//!
//! Failures fall into four categories, see [`LookupError`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;

/// Default lookup endpoint; the BIN is appended as a path segment.
pub const DEFAULT_ENDPOINT: &str = "https://data.handyapi.com/bin";

/// Default timeout for a lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum number of digits accepted as a BIN.
pub const MIN_BIN_DIGITS: usize = 6;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug)]
enum TransportError {
    Timeout,
    Connection(String),
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .timeout(timeout)
                .send()
                .await
                .map_err(Self::classify)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(Self::classify)?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Errors returned by [`BinLookupClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The service did not answer within the timeout.
    #[error("BIN service timed out")]
    Timeout,

    /// DNS, TLS or connection failure, or a non-2xx HTTP status.
    #[error("connection error: {0}")]
    Connection(String),

    /// The body was not the expected JSON document.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service answered but did not report a match.
    #[error("BIN not found")]
    NotFound {
        /// Message returned by the service, if any.
        message: Option<String>,
    },

    /// The HTTP client could not be built.
    #[error("client setup failed: {0}")]
    Setup(String),
}

/// Issuer information for a BIN, as reported by the lookup service.
///
/// Text fields the service left empty are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinRecord {
    /// The BIN that was looked up.
    pub bin: String,
    /// Issuing bank.
    pub issuer: Option<String>,
    /// Card network, e.g. `VISA`.
    pub scheme: Option<String>,
    /// Card type, e.g. `CREDIT` or `DEBIT`.
    pub card_type: Option<String>,
    /// Card tier, e.g. `CLASSIC` or `PLATINUM`.
    pub tier: Option<String>,
    /// Full country name.
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Wall time the lookup took.
    pub latency: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    scheme: Option<String>,
    #[serde(default, rename = "Type")]
    card_type: Option<String>,
    #[serde(default)]
    issuer: Option<String>,
    #[serde(default)]
    card_tier: Option<String>,
    #[serde(default)]
    country: Option<ApiCountry>,
}

#[derive(Debug, Deserialize)]
struct ApiCountry {
    #[serde(default, rename = "A2")]
    a2: Option<String>,
    #[serde(default, rename = "Name")]
    name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ApiResponse {
    fn into_record(self, bin: &str, latency: Duration) -> Result<BinRecord, LookupError> {
        if !self.status.eq_ignore_ascii_case("SUCCESS") {
            return Err(LookupError::NotFound {
                message: non_empty(self.message),
            });
        }

        let (country, country_code) = match self.country {
            Some(c) => (non_empty(c.name), non_empty(c.a2)),
            None => (None, None),
        };

        Ok(BinRecord {
            bin: bin.to_string(),
            issuer: non_empty(self.issuer),
            scheme: non_empty(self.scheme),
            card_type: non_empty(self.card_type),
            tier: non_empty(self.card_tier),
            country,
            country_code,
            latency,
        })
    }
}

/// Normalizes user input into a BIN.
///
/// Spaces are removed; the rest must be at least [`MIN_BIN_DIGITS`] ASCII
/// digits.
///
/// # Example
///
/// ```
/// use binchecker::lookup::normalize_bin;
///
/// assert_eq!(normalize_bin(" 457 173 ").as_deref(), Some("457173"));
/// assert_eq!(normalize_bin("4571"), None);
/// assert_eq!(normalize_bin("45717x"), None);
/// ```
pub fn normalize_bin(input: &str) -> Option<String> {
    let bin: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if bin.len() >= MIN_BIN_DIGITS && crate::digits::is_all_digits(&bin) {
        Some(bin)
    } else {
        None
    }
}

/// Builder for [`BinLookupClient`].
#[derive(Debug, Clone)]
pub struct BinLookupClientBuilder {
    endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for BinLookupClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl BinLookupClientBuilder {
    /// Override the lookup endpoint (without trailing BIN segment).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-lookup timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BinLookupClient`].
    pub fn build(self) -> Result<BinLookupClient, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| LookupError::Setup(err.to_string()))?;

        Ok(BinLookupClient {
            endpoint: self.endpoint.trim_end_matches('/').to_owned(),
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

/// HTTP client for the BIN lookup service.
#[derive(Clone)]
pub struct BinLookupClient {
    endpoint: String,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl BinLookupClient {
    /// Start building a client with custom settings.
    pub fn builder() -> BinLookupClientBuilder {
        BinLookupClientBuilder::default()
    }

    /// The configured per-lookup timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url_for(&self, bin: &str) -> String {
        format!("{}/{}", self.endpoint, bin)
    }

    /// Looks up issuer information for `bin`.
    ///
    /// `bin` should already be normalized with [`normalize_bin`].
    pub async fn lookup(&self, bin: &str) -> Result<BinRecord, LookupError> {
        let url = self.url_for(bin);
        let started = Instant::now();

        let response = self.fetch(&url, self.timeout).await?;
        let latency = started.elapsed();

        let parsed: ApiResponse = serde_json::from_str(&response.body)
            .map_err(|err| LookupError::MalformedResponse(err.to_string()))?;
        let record = parsed.into_record(bin, latency)?;

        tracing::debug!(
            bin = %bin,
            latency_ms = latency.as_millis() as u64,
            "BIN lookup succeeded"
        );
        Ok(record)
    }

    /// Checks that the service answers for `bin` within `timeout`.
    ///
    /// Only the HTTP status is inspected; returns the round-trip latency.
    pub async fn probe(&self, bin: &str, timeout: Duration) -> Result<Duration, LookupError> {
        let url = self.url_for(bin);
        let started = Instant::now();
        self.fetch(&url, timeout).await?;
        Ok(started.elapsed())
    }

    async fn fetch(&self, url: &str, timeout: Duration) -> Result<HttpResponse, LookupError> {
        let response = self.http.get(url, timeout).await.map_err(|err| {
            tracing::warn!(url = %url, error = ?err, "BIN service request failed");
            match err {
                TransportError::Timeout => LookupError::Timeout,
                TransportError::Connection(msg) => LookupError::Connection(msg),
            }
        })?;

        if !(200..=299).contains(&response.status) {
            tracing::warn!(url = %url, status = response.status, "BIN service returned an error status");
            return Err(LookupError::Connection(format!(
                "HTTP status {}",
                response.status
            )));
        }

        Ok(response)
    }
}
