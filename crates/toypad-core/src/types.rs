use crate::{
    Result,
    constants::{AUTH_KEY_LEN, DISCRIMINATOR_LEN, DISCRIMINATOR_OFFSET, PAYLOAD_LEN, UID_LEN},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Tag unique identifier (7 bytes, factory programmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagUid([u8; UID_LEN]);

impl TagUid {
    /// Create a UID from its raw bytes.
    pub const fn new(bytes: [u8; UID_LEN]) -> Self {
        TagUid(bytes)
    }

    /// Create a UID from a byte slice.
    ///
    /// # Errors
    /// Returns `Error::UidLength` if the slice is not exactly 7 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; UID_LEN] = bytes.try_into().map_err(|_| Error::UidLength {
            expected: UID_LEN,
            actual: bytes.len(),
        })?;
        Ok(TagUid(arr))
    }

    /// Parse a UID from hex, accepting `-`, `:` or whitespace separators.
    ///
    /// # Errors
    /// Returns `Error::InvalidUid` for non-hex input and `Error::UidLength`
    /// if the decoded length is not 7 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use toypad_core::TagUid;
    ///
    /// let a = TagUid::from_hex("04-A1-B2-C3-D4-E5-F6").unwrap();
    /// let b = TagUid::from_hex("04a1b2c3d4e5f6").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | ':') && !c.is_whitespace())
            .collect();

        if digits.len() % 2 != 0 || !digits.is_ascii() {
            return Err(Error::InvalidUid(s.to_string()));
        }

        let bytes = (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| Error::InvalidUid(s.to_string()))?;

        Self::from_slice(&bytes)
    }

    /// Get the raw UID bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; UID_LEN] {
        &self.0
    }

    /// Format the UID as compact upper-case hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02X}")).collect()
    }
}

impl fmt::Display for TagUid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl std::str::FromStr for TagUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TagUid::from_hex(s)
    }
}

/// Per-tag authentication password.
///
/// # Security
/// Comparison runs in constant time so a reader implementation cannot leak
/// how many leading bytes of a guessed password were correct.
#[derive(Clone, Copy, Eq)]
pub struct AuthKey([u8; AUTH_KEY_LEN]);

impl AuthKey {
    /// Wrap raw password bytes.
    pub const fn new(bytes: [u8; AUTH_KEY_LEN]) -> Self {
        AuthKey(bytes)
    }

    /// Get the raw password bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; AUTH_KEY_LEN] {
        &self.0
    }
}

impl PartialEq for AuthKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthKey(****)")
    }
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{}", parts.join("-"))
    }
}

/// Identification payload read from the tag (16 bytes from page `0x24`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPayload([u8; PAYLOAD_LEN]);

impl TagPayload {
    /// Build a payload from the bytes returned by a READ command.
    ///
    /// Readers may return more than 16 bytes (e.g. trailing CRC); only the
    /// first 16 are kept.
    ///
    /// # Errors
    /// Returns `Error::PayloadTooShort` if fewer than 16 bytes were read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PAYLOAD_LEN {
            return Err(Error::PayloadTooShort {
                expected: PAYLOAD_LEN,
                actual: bytes.len(),
            });
        }
        let mut data = [0u8; PAYLOAD_LEN];
        data.copy_from_slice(&bytes[..PAYLOAD_LEN]);
        Ok(TagPayload(data))
    }

    /// Get the full payload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// The 4-byte kind discriminator (page `0x26`).
    #[must_use]
    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        let mut d = [0u8; DISCRIMINATOR_LEN];
        d.copy_from_slice(&self.0[DISCRIMINATOR_OFFSET..DISCRIMINATOR_OFFSET + DISCRIMINATOR_LEN]);
        d
    }

    /// Fixed-size view of `N` bytes starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + N` exceeds the payload length. Callers use the
    /// layout constants, which are checked at compile time by tests.
    #[must_use]
    pub fn field<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[offset..offset + N]);
        out
    }
}

/// Figurine category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Vehicle,
    Character,
}

impl TagKind {
    /// Lower-case label used in console output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TagKind::Vehicle => "vehicle",
            TagKind::Character => "character",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TagKind::Vehicle => write!(f, "Vehicle"),
            TagKind::Character => write!(f, "Character"),
        }
    }
}

impl std::str::FromStr for TagKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vehicle" | "v" => Ok(TagKind::Vehicle),
            "character" | "c" => Ok(TagKind::Character),
            _ => Err(Error::UnknownTagKind(s.to_string())),
        }
    }
}

/// Catalog identifier, unique within one [`TagKind`] namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(u32);

impl CatalogId {
    pub const fn new(id: u32) -> Self {
        CatalogId(id)
    }

    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u16> for CatalogId {
    fn from(id: u16) -> Self {
        CatalogId(u32::from(id))
    }
}

impl From<u32> for CatalogId {
    fn from(id: u32) -> Self {
        CatalogId(id)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub name: String,
    pub world: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<CatalogId>, name: impl Into<String>, world: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            world: world.into(),
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.world)
    }
}
