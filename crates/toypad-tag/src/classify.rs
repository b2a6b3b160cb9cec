//! Vehicle/character classification.

use toypad_core::{
    TagKind, TagPayload,
    constants::{DISCRIMINATOR_LEN, VEHICLE_SENTINEL},
};

/// Classify a raw discriminator field.
///
/// Only the exact vehicle sentinel `00 01 00 00` yields
/// [`TagKind::Vehicle`]; every other pattern is a character.
#[must_use]
pub fn classify_discriminator(discriminator: &[u8; DISCRIMINATOR_LEN]) -> TagKind {
    if *discriminator == VEHICLE_SENTINEL {
        TagKind::Vehicle
    } else {
        TagKind::Character
    }
}

/// Classify a payload by its discriminator (page `0x26`).
#[must_use]
pub fn classify(payload: &TagPayload) -> TagKind {
    classify_discriminator(&payload.discriminator())
}
