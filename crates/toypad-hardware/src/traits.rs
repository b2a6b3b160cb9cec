//! Reader trait definitions.
//!
//! This module defines the contract between the tag scanner and a
//! contactless reader. Radio-level work (target detection, framing, baud
//! rate negotiation) and the NTAG command set (PWD_AUTH, READ) live behind
//! this trait, so the scanner can run against a PN532 driver or the
//! [`MockReader`](crate::mock::MockReader) alike.
//!
//! All methods use native `async fn` (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use toypad_core::{AuthKey, TagPayload, TagUid};

use crate::error::Result;
use crate::types::ReaderInfo;

/// Contactless reader abstraction for figurine tags.
///
/// A reader serves a single active tag at a time. Calls are made strictly
/// in sequence by one scanner task; implementations do not need to handle
/// concurrent commands.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. Use generic type parameters, or the
/// [`AnyTagReader`](crate::devices::AnyTagReader) enum for concrete dispatch.
///
/// # Examples
///
/// ```no_run
/// use toypad_core::{AuthKey, constants::PAYLOAD_PAGE};
/// use toypad_hardware::traits::TagReader;
/// use toypad_hardware::error::Result;
///
/// async fn read_once<R: TagReader>(reader: &mut R, key: AuthKey) -> Result<()> {
///     if let Some(uid) = reader.detect_target().await? {
///         reader.authenticate(&uid, &key).await?;
///         let payload = reader.read_payload(&uid, PAYLOAD_PAGE).await?;
///         println!("{uid}: {:02X?}", payload.as_bytes());
///     }
///     Ok(())
/// }
/// ```
pub trait TagReader: Send + Sync {
    /// Poll for a tag in the field.
    ///
    /// Returns immediately with `Ok(None)` when no tag is present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reader is disconnected
    /// - The anticollision answer cannot be decoded
    async fn detect_target(&mut self) -> Result<Option<TagUid>>;

    /// Unlock the protected pages of `uid` with a password (PWD_AUTH).
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::AuthenticationRejected`] if the tag refuses
    /// the password, or a transport error if the exchange fails.
    ///
    /// [`HardwareError::AuthenticationRejected`]: crate::HardwareError::AuthenticationRejected
    async fn authenticate(&mut self, uid: &TagUid, key: &AuthKey) -> Result<()>;

    /// Read 16 bytes (four pages) starting at `page`.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::CardReadError`] on a NAK or short answer,
    /// or a transport error if the exchange fails.
    ///
    /// [`HardwareError::CardReadError`]: crate::HardwareError::CardReadError
    async fn read_payload(&mut self, uid: &TagUid, page: u8) -> Result<TagPayload>;

    /// Get reader information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// reader information.
    async fn get_reader_info(&self) -> Result<ReaderInfo>;
}
