//! Reader abstraction layer for the toy pad scanner.
//!
//! This crate provides the trait-based boundary between the tag scanner and
//! the contactless hardware that talks to figurine tags. Radio work, frame
//! encoding and the NTAG command set stay behind [`TagReader`], which makes
//! it easy to swap a PN532 driver for the mock reader in tests.
//!
//! # Design Philosophy
//!
//! - **Async-first**: All I/O operations are asynchronous using native `async fn`
//!   in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Enum dispatch**: [`AnyTagReader`] replaces `Box<dyn TagReader>`.
//! - **Thread-safe**: The trait requires `Send + Sync` for use with Tokio.
//! - **Error-aware**: All operations return `Result<T>` and distinguish
//!   transport failures, password rejection and bad reads.
//!
//! # Reading a Figurine
//!
//! ```no_run
//! use toypad_core::{AuthKey, constants::PAYLOAD_PAGE};
//! use toypad_hardware::{TagReader, Result};
//!
//! async fn read_figurine<R: TagReader>(reader: &mut R, key: AuthKey) -> Result<()> {
//!     if let Some(uid) = reader.detect_target().await? {
//!         reader.authenticate(&uid, &key).await?;
//!         let payload = reader.read_payload(&uid, PAYLOAD_PAGE).await?;
//!         println!("{uid}: {:02X?}", payload.as_bytes());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`][error::Result] which uses the
//! [`HardwareError`] error type.
//!
//! [`AnyTagReader`]: devices::AnyTagReader
//! [`TagReader`]: traits::TagReader

pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use devices::AnyTagReader;
pub use error::{HardwareError, Result};
pub use traits::TagReader;
pub use types::ReaderInfo;
