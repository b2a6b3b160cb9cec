//! Console rendering.

use toypad_core::{CatalogEntry, CatalogId, TagKind, TagUid};
use toypad_scanner::{PageDump, ScanEvent, ScanStats};
use toypad_tag::{KeyDerivation, ScrambleKeyDerivation, TeaCharacterCipher, VendorConstants};

pub const UNREADABLE: &str = "Can't read the tag, place it again or another one";

fn id_prefix(kind: TagKind) -> &'static str {
    match kind {
        TagKind::Vehicle => "vehicle ID:",
        TagKind::Character => "Character ID:",
    }
}

/// Lines printed for a scanner event. Detections are only logged.
pub fn event_lines(event: &ScanEvent) -> Vec<String> {
    match event {
        ScanEvent::Detected { .. } => Vec::new(),
        ScanEvent::Classified { kind, .. } => vec![format!("Found a {}.", kind.label())],
        ScanEvent::Resolved { kind, entry, .. } => {
            vec![format!("{} {} {entry}", id_prefix(*kind), entry.id)]
        }
        ScanEvent::Unresolved { kind, id, .. } => vec![format!(
            "{} {id} and {} does not exist!",
            id_prefix(*kind),
            kind.label()
        )],
        ScanEvent::Failed(_) => vec![UNREADABLE.to_string()],
    }
}

/// Catalog lookup result, worded like a scan.
pub fn lookup_line(kind: TagKind, id: CatalogId, entry: Option<&CatalogEntry>) -> String {
    match entry {
        Some(entry) => format!("{} {id} {entry}", id_prefix(kind)),
        None => format!("{} {id} and {} does not exist!", id_prefix(kind), kind.label()),
    }
}

/// Password and TEA key derived for `uid`.
pub fn key_lines(uid: &TagUid, constants: VendorConstants) -> Vec<String> {
    let password = ScrambleKeyDerivation::new(constants).derive_key(uid);
    let tea = TeaCharacterCipher::new(constants).key_for(uid);
    let words: Vec<String> = tea.words().iter().map(|w| format!("{w:08X}")).collect();

    vec![
        format!("UID:      {uid}"),
        format!("Password: {password}"),
        format!("TEA key:  {}", words.join(" ")),
        format!("Table:    {}", constants.version),
    ]
}

pub fn page_line(row: &PageDump) -> String {
    let data = match row.data {
        Some(bytes) => bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" "),
        None => "unreadable".to_string(),
    };
    format!("  Block: {:02X} - {data}", row.page)
}

pub fn summary_line(stats: &ScanStats) -> String {
    format!(
        "{} polls, {} tags reported ({} unknown), {} failed reads",
        stats.cycles, stats.reported, stats.unresolved, stats.failures
    )
}
