//! Per-tag password derivation.
//!
//! Figurine tags are NTAG213 cards whose protected pages unlock with a
//! 4-byte PWD_AUTH password. The password is not stored anywhere: it is a
//! hash of the tag UID and a vendor salt, so any reader that knows the
//! scheme can compute it on the fly.
//!
//! # Scramble Hash
//!
//! ```text
//! buffer (32 bytes) = UID (7) ‖ salt (up to 25) ‖ zero padding
//! buffer[4n - 1]    = 0xAA
//! v = 0
//! for each little-endian word b in buffer[0 .. 4n]:
//!     v = b + rotr(v, 25) + rotr(v, 10) - v      (mod 2^32)
//! ```
//!
//! The password is `scramble(uid, PASSWORD_SALT, 8)` in little-endian byte
//! order. The character TEA key reuses the same hash with a second salt
//! (see [`crate::cipher`]).

use toypad_core::{AuthKey, TagUid, constants::UID_LEN};

const SCRAMBLE_BUFFER_LEN: usize = 32;
const SCRAMBLE_MARKER: u8 = 0xAA;

/// Versioned table of vendor constants for the scramble-based derivations.
///
/// The values cannot be derived from first principles; they come from
/// protocol reverse engineering and are verified against known UID/password
/// pairs in the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorConstants {
    /// Table revision, reported in diagnostics.
    pub version: &'static str,

    /// Salt appended to the UID for the PWD_AUTH password.
    pub password_salt: &'static [u8],

    /// Number of 32-bit words hashed for the password.
    pub password_words: usize,

    /// Salt appended to the UID for the character TEA key.
    pub tea_salt: &'static [u8],

    /// Word counts used for each of the four TEA key words.
    pub tea_words: [usize; 4],
}

impl VendorConstants {
    /// Constants used by the retail starter pack and all figurine waves.
    pub const LEGO_DIMENSIONS: VendorConstants = VendorConstants {
        version: "ld-2015.1",
        password_salt: b"(c) Copyright LEGO 2014\xAA",
        password_words: 8,
        tea_salt: &[
            0xB7, 0xD5, 0xD7, 0xE6, 0xE7, 0xBA, 0x3C, 0xA8, 0xD8, 0x75, 0x47, 0x68, 0xCF, 0x23,
            0xE9, 0xFE, 0xAA,
        ],
        tea_words: [3, 4, 5, 6],
    };
}

impl Default for VendorConstants {
    fn default() -> Self {
        Self::LEGO_DIMENSIONS
    }
}

/// Vendor scramble hash over `UID ‖ salt`, consuming `words` 32-bit words.
///
/// `words` is clamped to `1..=8`; the hash never reads past the 32-byte
/// buffer. Salt bytes beyond the buffer are ignored.
///
/// # Examples
///
/// ```
/// use toypad_core::TagUid;
/// use toypad_tag::{VendorConstants, scramble};
///
/// let uid = TagUid::from_hex("04A1B2C3D4E5F6").unwrap();
/// let salt = VendorConstants::LEGO_DIMENSIONS.password_salt;
/// assert_eq!(scramble(&uid, salt, 8), 0x5E7F_A50B);
/// ```
#[must_use]
pub fn scramble(uid: &TagUid, salt: &[u8], words: usize) -> u32 {
    let words = words.clamp(1, SCRAMBLE_BUFFER_LEN / 4);

    let mut buffer = [0u8; SCRAMBLE_BUFFER_LEN];
    buffer[..UID_LEN].copy_from_slice(uid.as_bytes());
    let salt_len = salt.len().min(SCRAMBLE_BUFFER_LEN - UID_LEN);
    buffer[UID_LEN..UID_LEN + salt_len].copy_from_slice(&salt[..salt_len]);
    buffer[words * 4 - 1] = SCRAMBLE_MARKER;

    buffer[..words * 4]
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .fold(0u32, |v, b| {
            b.wrapping_add(v.rotate_right(25))
                .wrapping_add(v.rotate_right(10))
                .wrapping_sub(v)
        })
}

/// Derivation of the PWD_AUTH password from a tag UID.
///
/// Implementations must be total, deterministic and pure: the same UID
/// always yields the same key, and nothing but the UID may influence it.
pub trait KeyDerivation: Send + Sync {
    /// Compute the authentication key for `uid`.
    fn derive_key(&self, uid: &TagUid) -> AuthKey;
}

/// Password derivation using the vendor scramble hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrambleKeyDerivation {
    constants: VendorConstants,
}

impl ScrambleKeyDerivation {
    /// Create a derivation bound to a specific constants table.
    pub fn new(constants: VendorConstants) -> Self {
        Self { constants }
    }

    /// The constants table in use.
    pub fn constants(&self) -> &VendorConstants {
        &self.constants
    }
}

impl KeyDerivation for ScrambleKeyDerivation {
    fn derive_key(&self, uid: &TagUid) -> AuthKey {
        let word = scramble(
            uid,
            self.constants.password_salt,
            self.constants.password_words,
        );
        AuthKey::new(word.to_le_bytes())
    }
}

impl<K: KeyDerivation + ?Sized> KeyDerivation for &K {
    fn derive_key(&self, uid: &TagUid) -> AuthKey {
        (**self).derive_key(uid)
    }
}
