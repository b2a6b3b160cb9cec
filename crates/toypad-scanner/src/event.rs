//! Scan results and the events published while producing them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toypad_core::{CatalogEntry, CatalogId, TagKind, TagUid};
use toypad_hardware::HardwareError;
use toypad_tag::TagError;

/// Which step of a scan cycle went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The reader could not be reached or the exchange broke down.
    ReaderCommunication,

    /// The tag refused the derived password.
    Authentication,

    /// The payload could not be read or did not decode.
    PayloadRead,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReaderCommunication => write!(f, "reader communication"),
            Self::Authentication => write!(f, "authentication"),
            Self::PayloadRead => write!(f, "payload read"),
        }
    }
}

/// A failed scan cycle.
///
/// Failures are reported and recovered from; they never stop the scan loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} failure: {message}")]
pub struct ScanFailure {
    pub kind: ErrorKind,

    /// Tag being processed, if one had been detected.
    pub uid: Option<TagUid>,

    pub message: String,
}

impl ScanFailure {
    pub fn new(kind: ErrorKind, uid: Option<TagUid>, message: impl Into<String>) -> Self {
        Self {
            kind,
            uid,
            message: message.into(),
        }
    }

    /// Classify a reader error.
    ///
    /// Password rejection maps to [`ErrorKind::Authentication`] and NAKs or
    /// malformed answers to [`ErrorKind::PayloadRead`]. Everything else is a
    /// transport problem.
    pub fn from_hardware(uid: Option<TagUid>, err: &HardwareError) -> Self {
        let kind = if err.is_authentication() {
            ErrorKind::Authentication
        } else if err.is_read_failure() {
            ErrorKind::PayloadRead
        } else {
            ErrorKind::ReaderCommunication
        };
        Self::new(kind, uid, err.to_string())
    }

    /// A payload that was read but did not decode.
    pub fn from_tag(uid: TagUid, err: &TagError) -> Self {
        Self::new(ErrorKind::PayloadRead, Some(uid), err.to_string())
    }
}

/// Outcome of a fully processed tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagReport {
    pub uid: TagUid,
    pub kind: TagKind,
    pub id: CatalogId,

    /// Catalog record, or `None` if the id is not known.
    pub entry: Option<CatalogEntry>,

    /// When the tag was first seen in this cycle.
    pub detected_at: DateTime<Utc>,
}

impl TagReport {
    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }
}

/// Events published by the scanner, in cycle order.
///
/// A processed tag produces `Detected`, then `Classified`, then one of
/// `Resolved` / `Unresolved`. A failed cycle produces `Failed` (preceded by
/// `Detected` if a tag was found).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanEvent {
    /// A new tag entered the field.
    Detected { uid: TagUid },

    /// The payload was decoded.
    Classified {
        uid: TagUid,
        kind: TagKind,
        id: CatalogId,
    },

    /// The id is in the catalog.
    Resolved {
        uid: TagUid,
        kind: TagKind,
        entry: CatalogEntry,
    },

    /// The id is not in the catalog.
    Unresolved {
        uid: TagUid,
        kind: TagKind,
        id: CatalogId,
    },

    /// The cycle failed.
    Failed(ScanFailure),
}

/// Result of a single [`run_cycle`](crate::TagScanner::run_cycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No tag in the field.
    NoTarget,

    /// The tag already processed is still in the field.
    Debounced(TagUid),

    /// A new tag was processed.
    Reported(TagReport),

    /// The cycle failed.
    Failed(ScanFailure),
}

/// Running counts for a scan loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub cycles: u64,
    pub reported: u64,
    pub unresolved: u64,
    pub debounced: u64,
    pub failures: u64,
}

impl ScanStats {
    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::NoTarget => {}
            CycleOutcome::Debounced(_) => self.debounced += 1,
            CycleOutcome::Reported(report) => {
                self.reported += 1;
                if !report.is_resolved() {
                    self.unresolved += 1;
                }
            }
            CycleOutcome::Failed(_) => self.failures += 1,
        }
    }
}
