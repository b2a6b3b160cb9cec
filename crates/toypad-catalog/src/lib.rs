//! Figurine catalog for the toy pad scanner.
//!
//! Maps a `(TagKind, CatalogId)` pair to a human-readable record. Vehicle
//! and character ids live in separate namespaces, so the same number can
//! name one vehicle and one character.
//!
//! # Components
//!
//! - [`CatalogLookup`] - the lookup contract consumed by the scanner
//! - [`Catalog`] - keyed in-memory implementation
//! - [`builtin`] - the table compiled into the binary
//!
//! # Examples
//!
//! ```
//! use toypad_catalog::{Catalog, CatalogLookup};
//! use toypad_core::{CatalogId, TagKind};
//!
//! let catalog = Catalog::builtin();
//! let batman = catalog.resolve(TagKind::Character, CatalogId::new(1)).unwrap();
//! assert_eq!(batman.name, "Batman");
//!
//! assert!(catalog.resolve(TagKind::Vehicle, CatalogId::new(1)).is_none());
//! ```

pub mod builtin;
mod catalog;
mod error;

pub use catalog::{Catalog, CatalogFile, CatalogLookup};
pub use error::{CatalogError, CatalogResult};
