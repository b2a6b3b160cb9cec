//! toypad - figurine tag scanner
//!
//! Identifies toy figurines from the NFC tags in their bases. No physical
//! reader driver ships yet, so `scan` and `dump` run against a demo pad
//! that presents built-in figurines.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use toypad_catalog::{Catalog, CatalogLookup};
use toypad_core::constants::{
    DEFAULT_FAILURE_BACKOFF_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_INTERVAL_MS,
};
use toypad_core::{CatalogId, TagKind, TagUid};
use toypad_scanner::{Figurines, ScannerConfig};
use toypad_tag::VendorConstants;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod demo;
mod report;

/// toypad - figurine tag scanner
#[derive(Parser, Debug)]
#[command(name = "toypad")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON catalog to use instead of the built-in table
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan figurines placed on the demo pad
    Scan(ScanArgs),

    /// Print the password and character key derived for a UID
    Key {
        /// Tag UID, 7 hex bytes (separators allowed)
        uid: TagUid,
    },

    /// Look up a catalog record
    Lookup {
        /// vehicle or character
        kind: TagKind,

        /// Catalog id
        id: u32,
    },

    /// Dump the memory of a demo figurine
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Pause after an empty poll, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_ms: u64,

    /// Pause after a tag was reported, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_INTERVAL_MS)]
    settle_ms: u64,

    /// Pause after a failed read, in milliseconds
    #[arg(long, default_value_t = DEFAULT_FAILURE_BACKOFF_MS)]
    backoff_ms: u64,

    /// How long each demo figurine stays on the pad, in milliseconds
    #[arg(long, default_value_t = 3_000)]
    dwell_ms: u64,

    /// Stop after this many figurines (default: run until Ctrl-C)
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

impl ScanArgs {
    fn config(&self) -> ScannerConfig {
        ScannerConfig::default()
            .with_poll_interval(Duration::from_millis(self.poll_ms))
            .with_settle_interval(Duration::from_millis(self.settle_ms))
            .with_failure_backoff(Duration::from_millis(self.backoff_ms))
    }
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Tag UID of the demo figurine
    #[arg(long, default_value = "04A1B2C3D4E5F6")]
    uid: TagUid,

    /// Write a vehicle with this id
    #[arg(long, conflicts_with = "character")]
    vehicle: Option<u16>,

    /// Write a character with this id
    #[arg(long)]
    character: Option<u32>,

    /// Skip authentication; protected pages show as unreadable
    #[arg(long)]
    no_auth: bool,
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Scan(args) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let dwell = Duration::from_millis(args.dwell_ms);
            demo::scan(catalog, args.config(), dwell, args.count).await
        }
        Commands::Key { uid } => {
            for line in report::key_lines(&uid, VendorConstants::default()) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Lookup { kind, id } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let id = CatalogId::new(id);
            let entry = catalog.resolve(kind, id);
            println!("{}", report::lookup_line(kind, id, entry.as_ref()));
            Ok(())
        }
        Commands::Dump(args) => {
            let figurines = Figurines::default();
            let tag = match (args.vehicle, args.character) {
                (Some(id), _) => figurines.vehicle(args.uid, id),
                (None, Some(id)) => figurines.character(args.uid, id),
                (None, None) => figurines.blank(args.uid),
            };
            demo::dump(tag, !args.no_auth).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_flags_map_to_config() {
        let cli = Cli::parse_from(["toypad", "scan", "--poll-ms", "50", "--backoff-ms", "2000"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        let config = args.config();
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.settle_interval, Duration::from_millis(1000));
        assert_eq!(config.failure_backoff, Duration::from_millis(2000));
    }

    #[test]
    fn test_key_parses_uid() {
        let cli = Cli::parse_from(["toypad", "key", "04:56:26:3A:87:3A:80"]);
        let Commands::Key { uid } = cli.command else {
            panic!("expected key");
        };
        assert_eq!(uid, TagUid::from_hex("0456263A873A80").unwrap());
    }

    #[test]
    fn test_lookup_parses_kind() {
        let cli = Cli::parse_from(["toypad", "lookup", "character", "42"]);
        assert!(matches!(
            cli.command,
            Commands::Lookup {
                kind: TagKind::Character,
                id: 42
            }
        ));
    }

    #[test]
    fn test_dump_kind_flags_conflict() {
        let result = Cli::try_parse_from(["toypad", "dump", "--vehicle", "1", "--character", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to load catalog"));
    }
}
