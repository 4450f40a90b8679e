//! Telegram HTML reply texts.
//!
//! Everything that comes from the user or from the lookup service goes through
//! [`escape_html`] before it is placed in a reply.

use std::time::Duration;

use crate::check::CheckReport;
use crate::lookup::{BinRecord, LookupError};

/// Emoji used for countries missing from the flag table.
pub const GLOBE: &str = "🌍";

const FLAGS: &[(&str, &str)] = &[
    ("Argentina", "🇦🇷"),
    ("Brazil", "🇧🇷"),
    ("Chile", "🇨🇱"),
    ("United States", "🇺🇸"),
    ("Mexico", "🇲🇽"),
    ("Spain", "🇪🇸"),
    ("France", "🇫🇷"),
    ("Italy", "🇮🇹"),
    ("Germany", "🇩🇪"),
    ("United Kingdom", "🇬🇧"),
    ("Canada", "🇨🇦"),
];

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Flag emoji for a country name, or [`GLOBE`] when unknown.
pub fn flag_for(country: Option<&str>) -> &'static str {
    country
        .and_then(|name| FLAGS.iter().find(|(known, _)| *known == name))
        .map(|(_, flag)| *flag)
        .unwrap_or(GLOBE)
}

fn or_unknown(value: Option<&str>, fallback: &str) -> String {
    escape_html(value.unwrap_or(fallback))
}

fn seconds(latency: Duration) -> String {
    format!("{:.2}", latency.as_secs_f64())
}

pub(crate) fn welcome() -> String {
    [
        "👋 <b>Welcome to BIN Checker</b>",
        "",
        "Look up a BIN:",
        "<code>/bin 457173</code>",
        "",
        "Check a card payload:",
        "<code>/chk 4111111111111111|12|2026|123</code>",
        "",
        "Other commands:",
        "<code>/info</code> – About this bot",
        "<code>/status</code> – BIN service status",
    ]
    .join("\n")
}

pub(crate) fn info() -> String {
    format!(
        "🤖 <b>BIN Checker</b>\nVersion: <code>{}</code>\nUsage: <code>/bin &lt;6+ digits&gt;</code> or <code>/chk NUMBER|MM|YYYY|CVV</code>",
        env!("CARGO_PKG_VERSION")
    )
}

pub(crate) fn status_up(latency: Duration) -> String {
    format!(
        "✅ <b>API online</b>\nResponse time: <code>{} seconds</code> ⚡",
        seconds(latency)
    )
}

pub(crate) fn status_down(err: &LookupError) -> String {
    format!(
        "❌ <b>API offline or not responding.</b>\nDetails: <code>{}</code>",
        escape_html(&err.to_string())
    )
}

pub(crate) fn bin_usage() -> String {
    "⚠️ Use <code>/bin</code> followed by a numeric BIN of at least <b>6 digits</b>.".to_owned()
}

pub(crate) fn chk_usage() -> String {
    "⚠️ Use <code>/chk NUMBER|MM|YYYY|CVV</code>, e.g. <code>/chk 4111111111111111|12|2026|123</code>."
        .to_owned()
}

/// User-facing text for a failed lookup; one distinct message per category.
pub fn lookup_failure(err: &LookupError) -> String {
    match err {
        LookupError::Timeout => "⏳ The BIN service took too long to answer. Try again later.".to_owned(),
        LookupError::Connection(_) | LookupError::Setup(_) => {
            "📡 Could not reach the BIN service. Try again later.".to_owned()
        }
        LookupError::MalformedResponse(_) => {
            "⚠️ The BIN service sent an unexpected response.".to_owned()
        }
        LookupError::NotFound { message: Some(message) } => format!("❌ {}", escape_html(message)),
        LookupError::NotFound { message: None } => "❌ BIN not valid or not found.".to_owned(),
    }
}

fn record_lines(record: &BinRecord) -> String {
    let country = record.country.as_deref();
    format!(
        "🏦 Bank: <code>{}</code>\n{} Country: <code>{}</code>\n💠 Scheme: <code>{}</code>\n💳 Type: <code>{}</code>\n⭐ Tier: <code>{}</code>",
        or_unknown(record.issuer.as_deref(), "Not available"),
        flag_for(country),
        or_unknown(country, "Unknown"),
        or_unknown(record.scheme.as_deref(), "Unknown"),
        or_unknown(record.card_type.as_deref(), "Not available"),
        or_unknown(record.tier.as_deref(), "Not available"),
    )
}

/// Reply for a successful `/bin` lookup.
pub fn bin_reply(record: &BinRecord, user_count: u64) -> String {
    format!(
        "💳 <b>BIN {}</b>\n\n{}\n\n⏱️ Response time: <code>{}s</code>\n📈 Your total queries: <code>{}</code>",
        escape_html(&record.bin),
        record_lines(record),
        seconds(record.latency),
        user_count,
    )
}

/// Reply for a well-formed `/chk` payload.
///
/// `lookup` is `None` when no lookup was attempted.
pub fn check_reply(
    report: &CheckReport,
    lookup: Option<&Result<BinRecord, LookupError>>,
    user_count: u64,
) -> String {
    let luhn = if report.passes_luhn() {
        "✅ Luhn: <b>valid</b>"
    } else {
        "❌ Luhn: <b>invalid</b>"
    };
    let expiry = if report.expired() {
        format!("⌛ Expiry: <code>{}</code> <b>expired</b>", report.expiry_display())
    } else {
        format!("📅 Expiry: <code>{}</code> <b>active</b>", report.expiry_display())
    };

    let mut text = format!(
        "💳 <b>Card check</b>\n\n🔢 Number: <code>{}</code>\n{}\n{}",
        escape_html(report.masked()),
        luhn,
        expiry,
    );

    match lookup {
        Some(Ok(record)) => {
            text.push_str(&format!(
                "\n\n<b>BIN {}</b>\n{}",
                escape_html(&record.bin),
                record_lines(record)
            ));
        }
        Some(Err(err)) => {
            text.push_str("\n\n");
            text.push_str(&lookup_failure(err));
        }
        None => {}
    }

    text.push_str(&format!("\n\n📈 Your total queries: <code>{user_count}</code>"));
    text
}
