//! Error types for tag decoding.

use toypad_core::TagUid;

/// Result type alias for tag decoding.
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while turning payload bytes into a catalog id.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TagError {
    /// The decrypted character block does not carry the id twice.
    #[error("Corrupt character block on {uid}: words {first:#010X} and {second:#010X} differ")]
    CorruptCharacterBlock { uid: TagUid, first: u32, second: u32 },
}

impl TagError {
    /// Create a corrupt character block error.
    pub fn corrupt_character_block(uid: TagUid, first: u32, second: u32) -> Self {
        Self::CorruptCharacterBlock { uid, first, second }
    }
}
