//! Catalog id extraction.
//!
//! Vehicles and characters use unrelated layouts, so the resolver keeps two
//! separate algorithms and picks one by [`TagKind`]:
//!
//! - **Vehicle**: little-endian `u16` at payload offset 0. Only payload bytes
//!   are involved.
//! - **Character**: the 8-byte block at payload offset 0 is decrypted with a
//!   key derived from the UID (see [`crate::cipher`]).

use toypad_core::{
    CatalogId, TagKind, TagPayload, TagUid,
    constants::{CHARACTER_BLOCK_LEN, CHARACTER_BLOCK_OFFSET, VEHICLE_ID_OFFSET},
};

use crate::cipher::{CharacterIdDerivation, TeaCharacterCipher};
use crate::error::Result;
use crate::key::VendorConstants;

/// Extract a vehicle id from the payload.
#[must_use]
pub fn vehicle_id(payload: &TagPayload) -> CatalogId {
    CatalogId::from(u16::from_le_bytes(payload.field::<2>(VEHICLE_ID_OFFSET)))
}

/// Resolves catalog ids from classified payloads.
#[derive(Debug, Clone, Default)]
pub struct IdResolver<C = TeaCharacterCipher> {
    characters: C,
}

impl IdResolver<TeaCharacterCipher> {
    /// Resolver using the TEA character cipher for a constants table.
    pub fn from_constants(constants: VendorConstants) -> Self {
        Self::new(TeaCharacterCipher::new(constants))
    }
}

impl<C: CharacterIdDerivation> IdResolver<C> {
    /// Create a resolver with a custom character id derivation.
    pub fn new(characters: C) -> Self {
        Self { characters }
    }

    /// Compute the catalog id for an already classified payload.
    ///
    /// # Errors
    /// Returns a [`TagError`](crate::TagError) if a character block fails
    /// its integrity check. Vehicle extraction cannot fail.
    pub fn resolve(&self, kind: TagKind, uid: &TagUid, payload: &TagPayload) -> Result<CatalogId> {
        match kind {
            TagKind::Vehicle => Ok(vehicle_id(payload)),
            TagKind::Character => {
                let block = payload.field::<CHARACTER_BLOCK_LEN>(CHARACTER_BLOCK_OFFSET);
                self.characters.character_id(uid, &block)
            }
        }
    }
}
