//! Figurine scan loop.
//!
//! Ties the reader, the key and id derivations and the catalog together:
//!
//! ```text
//! detect ─► derive password ─► PWD_AUTH ─► READ page 0x24 ─► classify ─► resolve id ─► catalog
//! ```
//!
//! [`TagScanner::run_cycle`] performs one poll; [`TagScanner::run`] loops
//! until cancelled, pausing between polls per [`ScannerConfig`]. Progress is
//! published as [`ScanEvent`]s on an unbounded channel.
//!
//! # Examples
//!
//! ```no_run
//! use toypad_catalog::Catalog;
//! use toypad_hardware::mock::MockReader;
//! use toypad_scanner::{ScanEvent, ScannerConfig, TagScanner};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> toypad_core::Result<()> {
//!     let (reader, _handle) = MockReader::new();
//!     let (mut scanner, mut events) =
//!         TagScanner::new(reader, Catalog::builtin(), ScannerConfig::default());
//!
//!     tokio::spawn(async move {
//!         while let Some(event) = events.recv().await {
//!             if let ScanEvent::Resolved { entry, .. } = event {
//!                 println!("{entry}");
//!             }
//!         }
//!     });
//!
//!     scanner.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dump;
pub mod event;
pub mod figurine;
pub mod scanner;
pub mod state_machine;

pub use config::ScannerConfig;
pub use dump::{PageDump, dump_memory};
pub use event::{CycleOutcome, ErrorKind, ScanEvent, ScanFailure, ScanStats, TagReport};
pub use figurine::Figurines;
pub use scanner::TagScanner;
pub use state_machine::{ScanState, StateMachine, StateTransition};
