//! Tag layout constants for the toys-to-life figurine format.
//!
//! Figurines carry an NTAG213-class tag: 45 pages of 4 bytes each, read 16
//! bytes (four pages) at a time. The identification data lives in a fixed
//! window starting at page `0x24`:
//!
//! ```text
//! page 0x24  0x25  0x26  0x27
//!      [ id block  ][disc][    ]
//!       0..8        8..12
//! ```
//!
//! - Vehicles store their id as a little-endian `u16` at offset 0 and the
//!   sentinel `00 01 00 00` in the discriminator.
//! - Characters store an 8-byte encrypted block at offset 0; anything other
//!   than the vehicle sentinel in the discriminator means "character".
//!
//! # Usage
//!
//! ```
//! use toypad_core::constants::*;
//!
//! assert_eq!(PAYLOAD_PAGE, 0x24);
//! assert_eq!(DISCRIMINATOR_OFFSET + DISCRIMINATOR_LEN, 12);
//! assert!(DISCRIMINATOR_OFFSET + DISCRIMINATOR_LEN <= PAYLOAD_LEN);
//! ```

// ============================================================================
// Tag Geometry
// ============================================================================

/// Length of a figurine UID in bytes (ISO 14443-3 double-size UID).
pub const UID_LEN: usize = 7;

/// Size of one memory page in bytes.
pub const PAGE_SIZE: usize = 4;

/// Number of bytes returned by a single READ command (four pages).
pub const READ_LEN: usize = 16;

/// Total number of pages on an NTAG213 tag.
pub const NTAG213_PAGE_COUNT: u8 = 45;

// ============================================================================
// Authentication
// ============================================================================

/// Length of the PWD_AUTH password in bytes.
pub const AUTH_KEY_LEN: usize = 4;

/// Length of the character TEA key in 32-bit words.
pub const TEA_KEY_WORDS: usize = 4;

// ============================================================================
// Payload Layout
// ============================================================================

/// First page of the identification payload.
pub const PAYLOAD_PAGE: u8 = 0x24;

/// Length of the identification payload in bytes.
pub const PAYLOAD_LEN: usize = READ_LEN;

/// Offset of the kind discriminator within the payload (page `0x26`).
pub const DISCRIMINATOR_OFFSET: usize = 8;

/// Length of the kind discriminator in bytes.
pub const DISCRIMINATOR_LEN: usize = 4;

/// Discriminator value marking a vehicle tag.
pub const VEHICLE_SENTINEL: [u8; DISCRIMINATOR_LEN] = [0x00, 0x01, 0x00, 0x00];

/// Offset of the little-endian vehicle id within the payload.
pub const VEHICLE_ID_OFFSET: usize = 0;

/// Offset of the encrypted character block within the payload.
pub const CHARACTER_BLOCK_OFFSET: usize = 0;

/// Length of the encrypted character block (one TEA block).
pub const CHARACTER_BLOCK_LEN: usize = 8;

// ============================================================================
// Scanner Timing
// ============================================================================

/// Default interval between polls while no tag is present (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Default wait after a tag was processed or debounced (milliseconds).
pub const DEFAULT_SETTLE_INTERVAL_MS: u64 = 1000;

/// Default wait after a failed cycle (milliseconds).
pub const DEFAULT_FAILURE_BACKOFF_MS: u64 = 1000;
