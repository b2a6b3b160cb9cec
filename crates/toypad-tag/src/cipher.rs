//! Character id cipher.
//!
//! Character tags do not store their id in the clear. Pages `0x24..0x26`
//! hold one 8-byte TEA block whose plaintext is the id repeated twice as
//! little-endian `u32` words. The 128-bit TEA key is derived from the UID
//! with the same scramble hash used for the password, over a different
//! salt and four word counts.

use toypad_core::{
    CatalogId, TagUid,
    constants::{CHARACTER_BLOCK_LEN, TEA_KEY_WORDS},
};
use tracing::trace;

use crate::error::{Result, TagError};
use crate::key::{VendorConstants, scramble};

const TEA_DELTA: u32 = 0x9E37_79B9;
const TEA_ROUNDS: u32 = 32;

/// 128-bit TEA key as four 32-bit words.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TeaKey(pub [u32; TEA_KEY_WORDS]);

impl TeaKey {
    /// Derive the character key for `uid` from a constants table.
    #[must_use]
    pub fn derive(uid: &TagUid, constants: &VendorConstants) -> Self {
        TeaKey(
            constants
                .tea_words
                .map(|words| scramble(uid, constants.tea_salt, words)),
        )
    }

    /// Key words, for diagnostics.
    #[must_use]
    pub fn words(&self) -> &[u32; TEA_KEY_WORDS] {
        &self.0
    }
}

impl std::fmt::Debug for TeaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TeaKey(****)")
    }
}

/// Decrypt one TEA block given as two little-endian words.
#[must_use]
pub fn tea_decrypt(block: [u32; 2], key: &TeaKey) -> [u32; 2] {
    let [k0, k1, k2, k3] = key.0;
    let [mut v0, mut v1] = block;
    let mut sum = TEA_DELTA.wrapping_mul(TEA_ROUNDS);

    for _ in 0..TEA_ROUNDS {
        v1 = v1.wrapping_sub(
            (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
        );
        v0 = v0.wrapping_sub(
            (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
        );
        sum = sum.wrapping_sub(TEA_DELTA);
    }

    [v0, v1]
}

/// Encrypt one TEA block given as two little-endian words.
///
/// Only needed to build character payloads for the mock reader and tests;
/// the scanner itself never encrypts.
#[must_use]
pub fn tea_encrypt(block: [u32; 2], key: &TeaKey) -> [u32; 2] {
    let [k0, k1, k2, k3] = key.0;
    let [mut v0, mut v1] = block;
    let mut sum = 0u32;

    for _ in 0..TEA_ROUNDS {
        sum = sum.wrapping_add(TEA_DELTA);
        v0 = v0.wrapping_add(
            (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
        );
        v1 = v1.wrapping_add(
            (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
        );
    }

    [v0, v1]
}

fn block_to_words(block: &[u8; CHARACTER_BLOCK_LEN]) -> [u32; 2] {
    [
        u32::from_le_bytes([block[0], block[1], block[2], block[3]]),
        u32::from_le_bytes([block[4], block[5], block[6], block[7]]),
    ]
}

fn words_to_block(words: [u32; 2]) -> [u8; CHARACTER_BLOCK_LEN] {
    let mut block = [0u8; CHARACTER_BLOCK_LEN];
    block[..4].copy_from_slice(&words[0].to_le_bytes());
    block[4..].copy_from_slice(&words[1].to_le_bytes());
    block
}

/// Combination of UID and payload block into a character id.
///
/// Kept behind a trait so an alternative vendor table or scheme can be
/// injected into the [`IdResolver`](crate::IdResolver).
pub trait CharacterIdDerivation: Send + Sync {
    /// Decode the character id from the 8-byte block at payload offset 0.
    ///
    /// # Errors
    /// Returns [`TagError::CorruptCharacterBlock`] if the block does not
    /// decode to a consistent id.
    fn character_id(&self, uid: &TagUid, block: &[u8; CHARACTER_BLOCK_LEN]) -> Result<CatalogId>;
}

/// TEA-based character id decoding with a vendor constants table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeaCharacterCipher {
    constants: VendorConstants,
}

impl TeaCharacterCipher {
    pub fn new(constants: VendorConstants) -> Self {
        Self { constants }
    }

    /// The TEA key this cipher uses for `uid`.
    #[must_use]
    pub fn key_for(&self, uid: &TagUid) -> TeaKey {
        TeaKey::derive(uid, &self.constants)
    }

    /// Build the encrypted block a genuine tag with this UID and id carries.
    ///
    /// # Examples
    ///
    /// ```
    /// use toypad_core::{CatalogId, TagUid};
    /// use toypad_tag::{CharacterIdDerivation, TeaCharacterCipher};
    ///
    /// let cipher = TeaCharacterCipher::default();
    /// let uid = TagUid::from_hex("04A1B2C3D4E5F6").unwrap();
    /// let block = cipher.encode_block(&uid, CatalogId::new(42));
    /// assert_eq!(cipher.character_id(&uid, &block).unwrap(), CatalogId::new(42));
    /// ```
    #[must_use]
    pub fn encode_block(&self, uid: &TagUid, id: CatalogId) -> [u8; CHARACTER_BLOCK_LEN] {
        let raw = id.as_u32();
        words_to_block(tea_encrypt([raw, raw], &self.key_for(uid)))
    }
}

impl CharacterIdDerivation for TeaCharacterCipher {
    fn character_id(&self, uid: &TagUid, block: &[u8; CHARACTER_BLOCK_LEN]) -> Result<CatalogId> {
        let [first, second] = tea_decrypt(block_to_words(block), &self.key_for(uid));
        trace!(%uid, first, second, "decrypted character block");

        if first != second {
            return Err(TagError::corrupt_character_block(*uid, first, second));
        }
        Ok(CatalogId::new(first))
    }
}

impl<C: CharacterIdDerivation + ?Sized> CharacterIdDerivation for &C {
    fn character_id(&self, uid: &TagUid, block: &[u8; CHARACTER_BLOCK_LEN]) -> Result<CatalogId> {
        (**self).character_id(uid, block)
    }
}
