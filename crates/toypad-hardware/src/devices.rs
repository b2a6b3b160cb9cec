//! Enum wrapper for reader dispatch.
//!
//! Native `async fn` in traits (RPITIT - Rust Edition 2024) are not
//! object-safe, so `Box<dyn TagReader>` is unavailable. [`AnyTagReader`]
//! provides concrete type dispatch instead, with one variant per driver.
//!
//! # Examples
//!
//! ```
//! use toypad_hardware::devices::AnyTagReader;
//! use toypad_hardware::mock::MockReader;
//!
//! let (reader, _handle) = MockReader::new();
//! let any_reader = AnyTagReader::Mock(reader);
//! ```

use toypad_core::{AuthKey, TagPayload, TagUid};

use crate::mock::MockReader;
use crate::traits::TagReader;
use crate::{ReaderInfo, Result};

/// Enum wrapper for reader dispatch.
///
/// # Examples
///
/// ```
/// use toypad_hardware::devices::AnyTagReader;
/// use toypad_hardware::traits::TagReader;
/// use toypad_hardware::mock::MockReader;
///
/// #[tokio::main]
/// async fn main() -> toypad_hardware::Result<()> {
///     let (reader, _handle) = MockReader::new();
///     let any_reader = AnyTagReader::Mock(reader);
///
///     let info = any_reader.get_reader_info().await?;
///     println!("Reader: {}", info.name);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyTagReader {
    /// Mock reader for development and testing.
    Mock(MockReader),
}

impl TagReader for AnyTagReader {
    async fn detect_target(&mut self) -> Result<Option<TagUid>> {
        match self {
            Self::Mock(device) => device.detect_target().await,
        }
    }

    async fn authenticate(&mut self, uid: &TagUid, key: &AuthKey) -> Result<()> {
        match self {
            Self::Mock(device) => device.authenticate(uid, key).await,
        }
    }

    async fn read_payload(&mut self, uid: &TagUid, page: u8) -> Result<TagPayload> {
        match self {
            Self::Mock(device) => device.read_payload(uid, page).await,
        }
    }

    async fn get_reader_info(&self) -> Result<ReaderInfo> {
        match self {
            Self::Mock(device) => device.get_reader_info().await,
        }
    }
}

impl From<MockReader> for AnyTagReader {
    fn from(reader: MockReader) -> Self {
        Self::Mock(reader)
    }
}
