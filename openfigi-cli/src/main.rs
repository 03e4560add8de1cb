//! OpenFIGI CLI — map identifiers to FIGIs.
//!
//! Usage:
//! - `ofg ID_ISIN US0378331005` — look up one identifier
//! - `ofg TICKER IBM MSFT --mic-code XNYS --remove-missing` — several values, drop misses
//! - `ofg TICKER --input tickers.txt` — one value per line from a file
//! - `ofg --list-id-types` — print every identifier kind with its description
//!
//! Results go to stdout as pretty JSON; logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::Parser;
use openfigi_core::{ClientConfig, FigiClient, IdType, ResponseRecord};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ofg",
    version,
    about = "Map financial identifiers to FIGIs via the OpenFIGI API",
    after_help = "The API key is read from OPENFIGI_KEY (or openfigi_key). Without it, access is anonymous."
)]
struct Cli {
    /// Identifier kind, e.g. ID_ISIN, ID_CUSIP, TICKER (see --list-id-types).
    #[arg(required_unless_present = "list_id_types")]
    id_type: Option<String>,

    /// Identifier values to look up.
    id_values: Vec<String>,

    /// Read additional identifier values from a file, one per line.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Optional exchange code (cannot be combined with --mic-code).
    #[arg(long, default_value = "", conflicts_with = "mic_code")]
    exchange_code: String,

    /// Optional ISO market identification code (cannot be combined with --exchange-code).
    #[arg(long, default_value = "")]
    mic_code: String,

    /// Optional currency.
    #[arg(long, default_value = "")]
    currency: String,

    /// Drop results for identifiers the service could not map.
    #[arg(long, default_value_t = false)]
    remove_missing: bool,

    /// API version: v1 or v2. Overrides the config file.
    #[arg(long)]
    api_version: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the supported identifier kinds and exit.
    #[arg(long, default_value_t = false)]
    list_id_types: bool,

    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_id_types {
        print_id_types();
        return Ok(());
    }

    let config = build_config(cli.config.as_deref(), cli.api_version.as_deref())?;
    let values = collect_values(&cli.id_values, cli.input.as_deref())?;
    let id_type = cli.id_type.as_deref().unwrap_or_default();

    if id_type.parse::<IdType>().is_err() {
        bail!("unknown identifier kind '{id_type}' (see --list-id-types)");
    }
    if values.is_empty() {
        bail!("no identifier values given (pass them as arguments or via --input)");
    }

    let mut client = FigiClient::new(&config)?;
    for value in &values {
        client.enqueue(id_type, value, &cli.exchange_code, &cli.mic_code, &cli.currency)?;
    }

    let report = client.fetch_report(cli.remove_missing);
    let failed = report.failed_batches().count();
    print_records(&report.records)?;

    if failed > 0 {
        for batch in report.failed_batches() {
            eprintln!("Batch {} ({} items): {}", batch.index + 1, batch.size, batch.status);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(path: Option<&Path>, api_version: Option<&str>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };

    if let Some(version) = api_version {
        config.api_version = version.parse()?;
    }

    let config = config.with_env_key();
    if config.api_key.is_none() {
        info!("OPENFIGI_KEY not present in the environment, using anonymous access");
    }

    Ok(config)
}

fn collect_values(args: &[String], input: Option<&Path>) -> Result<Vec<String>> {
    let mut values = args.to_vec();
    if let Some(path) = input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let before = values.len();
        values.extend(parse_value_lines(&content));
        info!("read {} value(s) from {}", values.len() - before, path.display());
    }
    Ok(values)
}

fn parse_value_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}

fn print_records(records: &[ResponseRecord]) -> Result<()> {
    if records.is_empty() {
        warn!("no results");
    }
    println!("{}", render_records(records)?);
    Ok(())
}

/// Pretty JSON with object keys in sorted order.
fn render_records(records: &[ResponseRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn print_id_types() {
    println!("{:<32} Description", "ID_TYPE");
    println!("{}", "-".repeat(80));
    for kind in IdType::ALL {
        println!("{:<32} {}", kind.as_str(), kind.description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_values_and_flags() {
        let cli = Cli::try_parse_from([
            "ofg",
            "TICKER",
            "IBM",
            "MSFT",
            "--mic-code",
            "XNYS",
            "--remove-missing",
            "--api-version",
            "V1",
        ])
        .unwrap();
        assert_eq!(cli.id_type.as_deref(), Some("TICKER"));
        assert_eq!(cli.id_values, vec!["IBM", "MSFT"]);
        assert_eq!(cli.mic_code, "XNYS");
        assert_eq!(cli.exchange_code, "");
        assert!(cli.remove_missing);
        assert_eq!(cli.api_version.as_deref(), Some("V1"));
    }

    #[test]
    fn list_id_types_needs_no_positional() {
        let cli = Cli::try_parse_from(["ofg", "--list-id-types"]).unwrap();
        assert!(cli.list_id_types);
        assert!(cli.id_type.is_none());
    }

    #[test]
    fn exchange_and_mic_are_exclusive() {
        let result = Cli::try_parse_from([
            "ofg",
            "TICKER",
            "IBM",
            "--exchange-code",
            "US",
            "--mic-code",
            "XNYS",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn id_type_is_required_otherwise() {
        assert!(Cli::try_parse_from(["ofg"]).is_err());
    }

    #[test]
    fn value_file_skips_blank_lines() {
        let values: Vec<String> = parse_value_lines("IBM\n\n  MSFT  \n\t\nAAPL").collect();
        assert_eq!(values, vec!["IBM", "MSFT", "AAPL"]);
    }

    #[test]
    fn rendered_records_have_sorted_keys() {
        let record: ResponseRecord = serde_json::from_str(
            r#"{"z": 1, "idValue": "x", "data": [{"zz": 1, "a": 2}]}"#,
        )
        .unwrap();
        let rendered = render_records(&[record]).unwrap();

        let compact: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            compact.to_string(),
            r#"[{"data":[{"a":2,"zz":1}],"idValue":"x","z":1}]"#
        );
        let data = rendered.find("\"data\"").unwrap();
        let id_value = rendered.find("\"idValue\"").unwrap();
        let z = rendered.find("\"z\"").unwrap();
        assert!(data < id_value && id_value < z, "keys out of order:\n{rendered}");
    }

    #[test]
    fn api_version_flag_overrides_default() {
        let config = build_config(None, Some("v1")).unwrap();
        assert_eq!(config.api_version, openfigi_core::ApiVersion::V1);
        assert!(build_config(None, Some("v9")).is_err());
    }
}
