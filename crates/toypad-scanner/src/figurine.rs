//! Factory-programmed mock tags.
//!
//! Builds [`MockTag`]s laid out the way genuine figurines are: password set
//! to the UID-derived key, payload pages protected, and either a vehicle id
//! with the vehicle marker or an encrypted character block.

use toypad_core::constants::{
    CHARACTER_BLOCK_OFFSET, DISCRIMINATOR_OFFSET, PAYLOAD_LEN, PAYLOAD_PAGE, VEHICLE_ID_OFFSET,
    VEHICLE_SENTINEL,
};
use toypad_core::{CatalogId, TagUid};
use toypad_hardware::mock::MockTag;
use toypad_tag::{KeyDerivation, ScrambleKeyDerivation, TeaCharacterCipher, VendorConstants};

/// Mock figurine builder for one constants table.
///
/// # Examples
///
/// ```
/// use toypad_core::TagUid;
/// use toypad_scanner::Figurines;
///
/// let uid = TagUid::from_hex("0456263A873A80").unwrap();
/// let tag = Figurines::default().vehicle(uid, 1000);
/// assert_eq!(tag.uid(), uid);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Figurines {
    keys: ScrambleKeyDerivation,
    cipher: TeaCharacterCipher,
    payload_page: u8,
}

impl Figurines {
    pub fn new(constants: VendorConstants) -> Self {
        Self {
            keys: ScrambleKeyDerivation::new(constants),
            cipher: TeaCharacterCipher::new(constants),
            payload_page: PAYLOAD_PAGE,
        }
    }

    /// Place the payload at a different page.
    pub fn with_payload_page(mut self, page: u8) -> Self {
        self.payload_page = page;
        self
    }

    /// A vehicle or gadget tag.
    pub fn vehicle(&self, uid: TagUid, id: u16) -> MockTag {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[VEHICLE_ID_OFFSET..VEHICLE_ID_OFFSET + 2].copy_from_slice(&id.to_le_bytes());
        payload[DISCRIMINATOR_OFFSET..DISCRIMINATOR_OFFSET + VEHICLE_SENTINEL.len()]
            .copy_from_slice(&VEHICLE_SENTINEL);
        self.blank(uid).with_pages(self.payload_page, &payload)
    }

    /// A minifigure tag.
    pub fn character(&self, uid: TagUid, id: impl Into<CatalogId>) -> MockTag {
        let block = self.cipher.encode_block(&uid, id.into());
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[CHARACTER_BLOCK_OFFSET..CHARACTER_BLOCK_OFFSET + block.len()]
            .copy_from_slice(&block);
        self.blank(uid).with_pages(self.payload_page, &payload)
    }

    /// A tag with the right password but no payload written.
    pub fn blank(&self, uid: TagUid) -> MockTag {
        MockTag::new(uid)
            .with_password(self.keys.derive_key(&uid))
            .with_protected_from(self.payload_page)
    }
}

impl Default for Figurines {
    fn default() -> Self {
        Self::new(VendorConstants::default())
    }
}
