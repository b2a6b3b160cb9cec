//! Shared setup for scanner integration tests.
//!
//! [`Harness`] wires a [`MockReader`] and a small fixture catalog into a
//! [`TagScanner`], and keeps the reader handle and event receiver around
//! so tests can move figurines on and off the pad and inspect what the
//! scanner published.

#![allow(dead_code)]

use tokio::sync::mpsc;
use toypad_catalog::Catalog;
use toypad_core::{CatalogEntry, TagKind, TagUid};
use toypad_hardware::mock::{MockReader, MockReaderHandle};
use toypad_scanner::{ScanEvent, ScannerConfig, TagScanner};

/// Fixture UIDs and the vendor-encrypted character blocks they carry.
pub mod test_data {
    pub const UID_A: &str = "04A1B2C3D4E5F6";
    pub const UID_B: &str = "0456263A873A80";

    /// Character block of a genuine tag with UID_A and character id 1.
    pub const UID_A_CHARACTER_1: [u8; 8] = [0xC1, 0x9C, 0xD6, 0x8D, 0xEE, 0x95, 0x06, 0xB0];

    /// Character block of a genuine tag with UID_B and character id 42.
    pub const UID_B_CHARACTER_42: [u8; 8] = [0x44, 0xD7, 0x95, 0x96, 0xEF, 0xD4, 0x16, 0x9A];

    /// PWD_AUTH password of UID_A.
    pub const UID_A_PASSWORD: [u8; 4] = [0x0B, 0xA5, 0x7F, 0x5E];

    /// PWD_AUTH password of UID_B.
    pub const UID_B_PASSWORD: [u8; 4] = [0x21, 0x7A, 0x6E, 0xAE];

    pub const VEHICLE_ID: u16 = 300;
    pub const CHARACTER_ID: u32 = 42;
    pub const UNKNOWN_VEHICLE_ID: u16 = 9_999;
}

pub fn uid(hex: &str) -> TagUid {
    TagUid::from_hex(hex).unwrap()
}

/// Catalog with one vehicle (300) and two characters (1, 42).
pub fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .insert(
            TagKind::Vehicle,
            CatalogEntry::new(300u32, "Fixture Buggy", "Test World"),
        )
        .unwrap();
    catalog
        .insert(TagKind::Character, CatalogEntry::new(1u32, "Batman", "DC Comics"))
        .unwrap();
    catalog
        .insert(
            TagKind::Character,
            CatalogEntry::new(42u32, "Fixture Hero", "Test World"),
        )
        .unwrap();
    catalog
}

pub struct Harness {
    pub scanner: TagScanner<MockReader, Catalog>,
    pub pad: MockReaderHandle,
    pub events: mpsc::UnboundedReceiver<ScanEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        let (reader, pad) = MockReader::with_name("Test Pad".to_string());
        let (scanner, events) = TagScanner::new(reader, fixture_catalog(), config);
        Self {
            scanner,
            pad,
            events,
        }
    }

    /// Everything published so far.
    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}
