use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toypad_core::{CatalogEntry, CatalogId, TagKind};
use tracing::debug;

use crate::builtin;
use crate::error::{CatalogError, CatalogResult};

/// Lookup contract consumed by the scanner.
///
/// Not finding an id is a normal outcome (a new figurine wave, a blank
/// tag) and is signalled with `None`, never with an error.
pub trait CatalogLookup: Send + Sync {
    /// Find the record for `id` within the `kind` namespace.
    fn resolve(&self, kind: TagKind, id: CatalogId) -> Option<CatalogEntry>;
}

impl<C: CatalogLookup + ?Sized> CatalogLookup for &C {
    fn resolve(&self, kind: TagKind, id: CatalogId) -> Option<CatalogEntry> {
        (**self).resolve(kind, id)
    }
}

impl<C: CatalogLookup + ?Sized> CatalogLookup for std::sync::Arc<C> {
    fn resolve(&self, kind: TagKind, id: CatalogId) -> Option<CatalogEntry> {
        (**self).resolve(kind, id)
    }
}

/// On-disk catalog layout.
///
/// ```json
/// {
///   "vehicles":   [{ "id": 1000, "name": "Police Car", "world": "The LEGO Movie" }],
///   "characters": [{ "id": 1, "name": "Batman", "world": "DC Comics" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub vehicles: Vec<CatalogEntry>,
    #[serde(default)]
    pub characters: Vec<CatalogEntry>,
}

/// Keyed in-memory catalog, one map per [`TagKind`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: HashMap<CatalogId, CatalogEntry>,
    characters: HashMap<CatalogId, CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in figurine table.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(id, name, world) in builtin::VEHICLES {
            catalog
                .vehicles
                .insert(CatalogId::new(id), CatalogEntry::new(id, name, world));
        }
        for &(id, name, world) in builtin::CHARACTERS {
            catalog
                .characters
                .insert(CatalogId::new(id), CatalogEntry::new(id, name, world));
        }
        catalog
    }

    /// Build a catalog from its file representation.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] if an id appears twice within
    /// the same kind.
    pub fn from_file(file: CatalogFile) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for entry in file.vehicles {
            catalog.insert(TagKind::Vehicle, entry)?;
        }
        for entry in file.characters {
            catalog.insert(TagKind::Character, entry)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed JSON and
    /// [`CatalogError::DuplicateId`] for repeated ids.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a JSON catalog from disk.
    ///
    /// # Errors
    /// Returns [`CatalogError::Read`] if the file cannot be read, plus the
    /// errors of [`Catalog::from_json`].
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            vehicles = catalog.vehicles.len(),
            characters = catalog.characters.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Add an entry.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] if the id is already taken
    /// within `kind`.
    pub fn insert(&mut self, kind: TagKind, entry: CatalogEntry) -> CatalogResult<()> {
        let map = self.map_mut(kind);
        if map.contains_key(&entry.id) {
            return Err(CatalogError::DuplicateId { kind, id: entry.id });
        }
        map.insert(entry.id, entry);
        Ok(())
    }

    /// Number of entries of `kind`.
    pub fn len(&self, kind: TagKind) -> usize {
        self.map(kind).len()
    }

    /// Whether the catalog has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.characters.is_empty()
    }

    /// Entries of `kind`, sorted by id.
    pub fn entries(&self, kind: TagKind) -> Vec<&CatalogEntry> {
        let mut entries: Vec<_> = self.map(kind).values().collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    fn map(&self, kind: TagKind) -> &HashMap<CatalogId, CatalogEntry> {
        match kind {
            TagKind::Vehicle => &self.vehicles,
            TagKind::Character => &self.characters,
        }
    }

    fn map_mut(&mut self, kind: TagKind) -> &mut HashMap<CatalogId, CatalogEntry> {
        match kind {
            TagKind::Vehicle => &mut self.vehicles,
            TagKind::Character => &mut self.characters,
        }
    }
}

impl CatalogLookup for Catalog {
    fn resolve(&self, kind: TagKind, id: CatalogId) -> Option<CatalogEntry> {
        self.map(kind).get(&id).cloned()
    }
}
