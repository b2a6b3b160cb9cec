//! Property-based tests for the identification pipeline.
//!
//! These tests use proptest to check the purity invariants of key
//! derivation, classification and id extraction over arbitrary UIDs and
//! payload bytes.

use proptest::prelude::*;
use toypad_core::{CatalogId, TagKind, TagPayload, TagUid, constants::VEHICLE_SENTINEL};
use toypad_tag::{
    CharacterIdDerivation, IdResolver, KeyDerivation, ScrambleKeyDerivation, TeaCharacterCipher,
    VendorConstants, classify, classify_discriminator,
};

/// Strategy for arbitrary 7-byte UIDs.
fn any_uid() -> impl Strategy<Value = TagUid> {
    any::<[u8; 7]>().prop_map(TagUid::new)
}

/// Strategy for arbitrary 16-byte payloads.
fn any_payload() -> impl Strategy<Value = TagPayload> {
    any::<[u8; 16]>().prop_map(|raw| TagPayload::from_bytes(&raw).expect("16 bytes"))
}

proptest! {
    /// Property: the same UID always yields the same key.
    #[test]
    fn prop_key_derivation_deterministic(uid in any_uid()) {
        let derivation = ScrambleKeyDerivation::default();
        prop_assert_eq!(derivation.derive_key(&uid), derivation.derive_key(&uid));

        let fresh = ScrambleKeyDerivation::new(VendorConstants::LEGO_DIMENSIONS);
        prop_assert_eq!(derivation.derive_key(&uid), fresh.derive_key(&uid));
    }

    /// Property: classification is stable and reads only the discriminator.
    #[test]
    fn prop_classification_depends_only_on_discriminator(
        raw in any::<[u8; 16]>(),
        noise in any::<[u8; 16]>(),
    ) {
        let payload = TagPayload::from_bytes(&raw).unwrap();

        let mut mixed = noise;
        mixed[8..12].copy_from_slice(&raw[8..12]);
        let other = TagPayload::from_bytes(&mixed).unwrap();

        let kind = classify(&payload);
        prop_assert_eq!(kind, classify(&payload));
        prop_assert_eq!(kind, classify(&other));
        prop_assert_eq!(kind, classify_discriminator(&payload.discriminator()));
    }

    /// Property: only the exact sentinel classifies as a vehicle.
    #[test]
    fn prop_non_sentinel_is_character(disc in any::<[u8; 4]>()) {
        prop_assume!(disc != VEHICLE_SENTINEL);
        prop_assert_eq!(classify_discriminator(&disc), TagKind::Character);
    }

    /// Property: vehicle ids never depend on the UID.
    #[test]
    fn prop_vehicle_id_ignores_uid(a in any_uid(), b in any_uid(), payload in any_payload()) {
        let resolver = IdResolver::from_constants(VendorConstants::LEGO_DIMENSIONS);
        let id_a = resolver.resolve(TagKind::Vehicle, &a, &payload).unwrap();
        let id_b = resolver.resolve(TagKind::Vehicle, &b, &payload).unwrap();
        prop_assert_eq!(id_a, id_b);
        prop_assert!(id_a.as_u32() <= u32::from(u16::MAX));
    }

    /// Property: a genuine character block decodes back to its id.
    #[test]
    fn prop_character_block_decodes(uid in any_uid(), id in any::<u16>()) {
        let cipher = TeaCharacterCipher::default();
        let block = cipher.encode_block(&uid, CatalogId::from(id));
        prop_assert_eq!(cipher.character_id(&uid, &block).unwrap(), CatalogId::from(id));
    }
}
