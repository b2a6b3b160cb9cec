//! Mock contactless reader implementation for testing and development.
//!
//! This module provides a simulated reader pad whose field can be filled
//! and emptied programmatically, with optional fault injection for each
//! reader operation.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use toypad_core::{
    AuthKey, TagPayload, TagUid,
    constants::{NTAG213_PAGE_COUNT, PAGE_SIZE, PAYLOAD_PAGE, READ_LEN},
};
use tracing::{debug, trace};

use crate::{HardwareError, Result, traits::TagReader, types::ReaderInfo};

/// Simulated NTAG213 tag.
///
/// Memory is modelled as 45 pages of 4 bytes. When a password is set,
/// pages from `protected_from` onward only read after a successful
/// PWD_AUTH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTag {
    uid: TagUid,
    memory: Vec<u8>,
    password: Option<AuthKey>,
    protected_from: u8,
    read_len: usize,
}

impl MockTag {
    /// Create a blank, unprotected tag.
    pub fn new(uid: TagUid) -> Self {
        let mut memory = vec![0u8; NTAG213_PAGE_COUNT as usize * PAGE_SIZE];
        // Pages 0-1 mirror the UID on a real tag (BCC bytes left zero).
        let bytes = uid.as_bytes();
        memory[..3].copy_from_slice(&bytes[..3]);
        memory[4..8].copy_from_slice(&bytes[3..]);

        Self {
            uid,
            memory,
            password: None,
            protected_from: PAYLOAD_PAGE,
            read_len: READ_LEN,
        }
    }

    /// Require `password` before pages from `PAYLOAD_PAGE` onward can be read.
    pub fn with_password(mut self, password: AuthKey) -> Self {
        self.password = Some(password);
        self
    }

    /// Change the first protected page.
    pub fn with_protected_from(mut self, page: u8) -> Self {
        self.protected_from = page;
        self
    }

    /// Write `data` starting at `page`. Bytes past the end of memory are dropped.
    pub fn with_pages(mut self, page: u8, data: &[u8]) -> Self {
        let start = page as usize * PAGE_SIZE;
        if start < self.memory.len() {
            let end = (start + data.len()).min(self.memory.len());
            self.memory[start..end].copy_from_slice(&data[..end - start]);
        }
        self
    }

    /// Truncate every READ answer to `len` bytes (simulates a flaky field).
    pub fn with_read_len(mut self, len: usize) -> Self {
        self.read_len = len;
        self
    }

    /// The tag UID.
    pub fn uid(&self) -> TagUid {
        self.uid
    }

    /// READ semantics: 16 bytes from `page`, rolling over past the last page.
    fn read(&self, page: u8) -> Result<Vec<u8>> {
        if page >= NTAG213_PAGE_COUNT {
            return Err(HardwareError::card_read(format!(
                "NAK: page {page:#04X} out of range"
            )));
        }

        let start = page as usize * PAGE_SIZE;
        let data = (0..READ_LEN)
            .map(|i| self.memory[(start + i) % self.memory.len()])
            .take(self.read_len)
            .collect();
        Ok(data)
    }
}

/// Reader operation targeted by an injected fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Detect,
    Authenticate,
    Read,
}

/// Operation counters, for asserting what the scanner actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockReaderStats {
    pub polls: usize,
    pub auth_attempts: usize,
    pub reads: usize,
}

#[derive(Debug, Default)]
struct MockState {
    tag: Option<MockTag>,
    authenticated: bool,
    faults: VecDeque<(MockOperation, HardwareError)>,
    stats: MockReaderStats,
}

impl MockState {
    fn take_fault(&mut self, op: MockOperation) -> Option<HardwareError> {
        let pos = self.faults.iter().position(|(o, _)| *o == op)?;
        self.faults.remove(pos).map(|(_, err)| err)
    }

    fn tag_in_field(&self, uid: &TagUid) -> Result<&MockTag> {
        self.tag
            .as_ref()
            .filter(|tag| tag.uid == *uid)
            .ok_or_else(|| HardwareError::communication(format!("target {uid} not in field")))
    }
}

/// Mock reader for testing and development.
///
/// # Examples
///
/// ```
/// use toypad_core::TagUid;
/// use toypad_hardware::mock::{MockReader, MockTag};
/// use toypad_hardware::traits::TagReader;
///
/// #[tokio::main]
/// async fn main() -> toypad_hardware::Result<()> {
///     let (mut reader, handle) = MockReader::new();
///
///     let uid = TagUid::from_hex("04A1B2C3D4E5F6").unwrap();
///     handle.place_tag(MockTag::new(uid)).await;
///
///     assert_eq!(reader.detect_target().await?, Some(uid));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockReader {
    state: Arc<Mutex<MockState>>,
    name: String,
}

impl MockReader {
    /// Create a new mock reader with the default name.
    ///
    /// Returns a tuple of (MockReader, MockReaderHandle) where the handle
    /// places and removes tags and injects faults.
    pub fn new() -> (Self, MockReaderHandle) {
        Self::with_name("Mock Toy Pad".to_string())
    }

    /// Create a new mock reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockReaderHandle) {
        let state = Arc::new(Mutex::new(MockState::default()));

        let reader = Self {
            state: Arc::clone(&state),
            name: name.clone(),
        };
        let handle = MockReaderHandle { state, name };

        (reader, handle)
    }
}

impl TagReader for MockReader {
    async fn detect_target(&mut self) -> Result<Option<TagUid>> {
        let mut state = self.state.lock().await;
        state.stats.polls += 1;

        if let Some(err) = state.take_fault(MockOperation::Detect) {
            return Err(err);
        }

        Ok(state.tag.as_ref().map(MockTag::uid))
    }

    async fn authenticate(&mut self, uid: &TagUid, key: &AuthKey) -> Result<()> {
        let mut state = self.state.lock().await;
        state.stats.auth_attempts += 1;

        if let Some(err) = state.take_fault(MockOperation::Authenticate) {
            return Err(err);
        }

        let accepted = match state.tag_in_field(uid)?.password {
            Some(expected) => expected == *key,
            None => true,
        };

        if !accepted {
            debug!(%uid, "mock tag rejected password");
            state.authenticated = false;
            return Err(HardwareError::authentication_rejected(uid.to_string()));
        }

        state.authenticated = true;
        Ok(())
    }

    async fn read_payload(&mut self, uid: &TagUid, page: u8) -> Result<TagPayload> {
        let mut state = self.state.lock().await;
        state.stats.reads += 1;

        if let Some(err) = state.take_fault(MockOperation::Read) {
            return Err(err);
        }

        let authenticated = state.authenticated;
        let tag = state.tag_in_field(uid)?;

        let end_page = page as usize + READ_LEN / PAGE_SIZE - 1;
        if tag.password.is_some()
            && !authenticated
            && end_page >= tag.protected_from as usize
        {
            return Err(HardwareError::card_read(format!(
                "NAK: page {page:#04X} is password protected"
            )));
        }

        let data = tag.read(page)?;
        trace!(%uid, page, len = data.len(), "mock read");
        TagPayload::from_bytes(&data).map_err(|e| HardwareError::card_read(e.to_string()))
    }

    async fn get_reader_info(&self) -> Result<ReaderInfo> {
        Ok(ReaderInfo::new(self.name.clone(), vec!["ISO14443A".to_string()])
            .with_max_baud_rate(106_000))
    }
}

/// Handle for controlling a mock reader.
///
/// Clones share the same reader state.
#[derive(Debug, Clone)]
pub struct MockReaderHandle {
    state: Arc<Mutex<MockState>>,
    name: String,
}

impl MockReaderHandle {
    /// Put a tag on the pad, replacing any tag already there.
    pub async fn place_tag(&self, tag: MockTag) {
        let mut state = self.state.lock().await;
        state.tag = Some(tag);
        state.authenticated = false;
    }

    /// Lift the current tag off the pad.
    pub async fn remove_tag(&self) -> Option<MockTag> {
        let mut state = self.state.lock().await;
        state.authenticated = false;
        state.tag.take()
    }

    /// UID of the tag on the pad, if any.
    pub async fn current_uid(&self) -> Option<TagUid> {
        self.state.lock().await.tag.as_ref().map(MockTag::uid)
    }

    /// Make the next call of `op` fail with `error`.
    ///
    /// Faults queue up; each one is consumed by a single call.
    pub async fn inject_fault(&self, op: MockOperation, error: HardwareError) {
        self.state.lock().await.faults.push_back((op, error));
    }

    /// Snapshot of the operation counters.
    pub async fn stats(&self) -> MockReaderStats {
        self.state.lock().await.stats
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
