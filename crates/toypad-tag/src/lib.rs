//! Tag identification logic for toys-to-life figurines.
//!
//! Everything in this crate is pure: no I/O, no clocks, no randomness. The
//! scanner feeds it a UID and the 16-byte payload read from page `0x24`,
//! and gets back an authentication key, a [`TagKind`] and a [`CatalogId`].
//!
//! # Pipeline
//!
//! ```text
//! TagUid ──► KeyDerivation ──► AuthKey (PWD_AUTH)
//!
//! TagPayload ──► classify ──► TagKind
//!                               │
//!          TagUid + TagPayload ─┴─► IdResolver ──► CatalogId
//! ```
//!
//! # Vendor Constants
//!
//! The password and character-key derivations use the vendor "scramble"
//! hash with salts that were recovered by reverse engineering. They are
//! kept together in [`VendorConstants`] so a different table can be
//! injected and checked against known-good fixtures.
//!
//! # Examples
//!
//! ```
//! use toypad_core::{TagKind, TagPayload, TagUid};
//! use toypad_tag::{IdResolver, KeyDerivation, ScrambleKeyDerivation, VendorConstants, classify};
//!
//! let uid = TagUid::from_hex("04A1B2C3D4E5F6").unwrap();
//! let key = ScrambleKeyDerivation::default().derive_key(&uid);
//! assert_eq!(key.as_bytes(), &[0x0B, 0xA5, 0x7F, 0x5E]);
//!
//! let mut raw = [0u8; 16];
//! raw[0] = 0x2C;
//! raw[1] = 0x01;
//! raw[8..12].copy_from_slice(&[0x00, 0x01, 0x00, 0x00]);
//! let payload = TagPayload::from_bytes(&raw).unwrap();
//!
//! let kind = classify(&payload);
//! assert_eq!(kind, TagKind::Vehicle);
//!
//! let id = IdResolver::from_constants(VendorConstants::LEGO_DIMENSIONS)
//!     .resolve(kind, &uid, &payload).unwrap();
//! assert_eq!(id.as_u32(), 300);
//! ```

pub mod cipher;
pub mod classify;
pub mod error;
pub mod key;
pub mod resolve;

pub use cipher::{CharacterIdDerivation, TeaCharacterCipher, TeaKey};
pub use classify::{classify, classify_discriminator};
pub use error::{Result, TagError};
pub use key::{KeyDerivation, ScrambleKeyDerivation, VendorConstants, scramble};
pub use resolve::{IdResolver, vehicle_id};
