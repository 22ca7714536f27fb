//! youngs-catch -- stdio tool server for spoken-sentence scoring.
//!
//! Usage: youngs-catch [--threshold <0-100>] [--max-chars <n>] [--deck <path.json>]

use anyhow::{Context, bail};
use youngs_catch::scoring::{CORRECT_THRESHOLD, MAX_SCORED_CHARS, Scorer};

/// Value following `flag` on the command line, if any.
fn arg_value(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

/// Parse a `--threshold` percentage; anything outside 0-100 is rejected.
fn parse_threshold(raw: &str) -> anyhow::Result<u8> {
    let threshold = raw
        .parse::<u8>()
        .with_context(|| format!("invalid --threshold: {raw}"))?;
    if threshold > 100 {
        bail!("invalid --threshold: {raw} (must be 0-100)");
    }
    Ok(threshold)
}

fn main() -> anyhow::Result<()> {
    // Log to stderr so it does not interfere with JSON-RPC on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let threshold = arg_value("--threshold")
        .map(|v| parse_threshold(&v))
        .transpose()?
        .unwrap_or(CORRECT_THRESHOLD);

    let max_chars = arg_value("--max-chars")
        .map(|v| v.parse::<usize>().with_context(|| format!("invalid --max-chars: {v}")))
        .transpose()?
        .unwrap_or(MAX_SCORED_CHARS);

    let config = youngs_catch::server::ServerConfig {
        scorer: Scorer::new(threshold, max_chars),
        deck: arg_value("--deck").map(std::path::PathBuf::from),
    };

    youngs_catch::run_server(config)
}
