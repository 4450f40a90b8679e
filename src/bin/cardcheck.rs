//! CLI tool for card payload checks.
//!
//! # Usage
//!
//! ```bash
//! # Check a NUMBER|MM|YYYY|CVV payload
//! cardcheck check "4111111111111111|12|2026|123"
//!
//! # Same, as JSON
//! cardcheck check "4111111111111111|12|26|123" --output json
//!
//! # Luhn only
//! cardcheck luhn 4111-1111-1111-1111
//!
//! # Mask or group a number
//! cardcheck mask 4111111111111111
//! cardcheck format 4111111111111111 --separator -
//! ```

use std::process::ExitCode;

use binchecker::format::group_with_separator;
use binchecker::{
    check_card, extract_digits, mask_digits, passes_luhn, CheckReport, InvalidCardInput,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Card payload checker: Luhn, expiry and masking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a NUMBER|MM|YYYY|CVV payload
    Check {
        /// Payload, e.g. 4111111111111111|12|2026|123
        payload: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number (non-digits are ignored)
        card_number: String,
    },

    /// Mask a card number, keeping the last four digits
    Mask {
        /// Card number (non-digits are ignored)
        card_number: String,
    },

    /// Group a card number in blocks of four
    Format {
        /// Card number (non-digits are ignored)
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Print only the ASCII digits of the input
    Digits {
        /// Arbitrary text
        input: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { payload, output } => cmd_check(&payload, output),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Mask { card_number } => cmd_mask(&card_number),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
        Commands::Digits { input } => {
            println!("{}", extract_digits(&input));
            ExitCode::SUCCESS
        }
    }
}

fn cmd_check(payload: &str, output: OutputFormat) -> ExitCode {
    match check_card(payload) {
        Ok(report) => {
            match output {
                OutputFormat::Text => {
                    println!("Card: {}", report.masked());
                    println!("BIN: {}", report.bin());
                    println!("Luhn: {}", if report.passes_luhn() { "PASS" } else { "FAIL" });
                    println!(
                        "Expiry: {} ({})",
                        report.expiry_display(),
                        if report.expired() { "expired" } else { "active" }
                    );
                }
                OutputFormat::Json => println!("{:#}", report_json(&report)),
            }
            if report.passes_luhn() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: no");
                    println!("Error: {}", e);
                }
                OutputFormat::Json => println!("{:#}", error_json(&e)),
            }
            ExitCode::FAILURE
        }
    }
}

/// `valid` follows the Luhn verdict, matching the exit code.
fn report_json(report: &CheckReport) -> serde_json::Value {
    serde_json::json!({
        "parsed": true,
        "valid": report.passes_luhn(),
        "report": report,
        "expiry": report.expiry_display(),
    })
}

fn error_json(err: &InvalidCardInput) -> serde_json::Value {
    serde_json::json!({ "parsed": false, "valid": false, "error": err.to_string() })
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if passes_luhn(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_mask(card_number: &str) -> ExitCode {
    let digits = extract_digits(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }
    println!("{}", mask_digits(&digits));
    ExitCode::SUCCESS
}

fn cmd_format(card_number: &str, separator: &str) -> ExitCode {
    let digits = extract_digits(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }
    println!("{}", group_with_separator(&digits, separator));
    ExitCode::SUCCESS
}
