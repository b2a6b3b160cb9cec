//! Raw tag memory dumps.

use std::fmt;

use serde::{Deserialize, Serialize};
use toypad_core::TagUid;
use toypad_core::constants::{PAGE_SIZE, READ_LEN};
use toypad_hardware::TagReader;
use tracing::{debug, warn};

const PAGES_PER_READ: u8 = (READ_LEN / PAGE_SIZE) as u8;

/// One page of a memory dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDump {
    pub page: u8,

    /// Page contents, or `None` if the read covering it failed.
    pub data: Option<[u8; PAGE_SIZE]>,
}

impl fmt::Display for PageDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:", self.page)?;
        match self.data {
            Some(bytes) => {
                for byte in bytes {
                    write!(f, " {byte:02X}")?;
                }
                Ok(())
            }
            None => write!(f, " -- -- -- --"),
        }
    }
}

/// Read pages `0..page_count` of `uid`, four pages per read.
///
/// Authenticate first if the protected area should be included. A failed
/// read does not abort the dump; the pages it covered are returned as
/// `None`.
pub async fn dump_memory<R: TagReader>(
    reader: &mut R,
    uid: &TagUid,
    page_count: u8,
) -> Vec<PageDump> {
    let mut pages = Vec::with_capacity(page_count as usize);

    for start in (0..page_count).step_by(PAGES_PER_READ as usize) {
        let chunk = match reader.read_payload(uid, start).await {
            Ok(payload) => Some(*payload.as_bytes()),
            Err(err) => {
                warn!(%uid, page = start, error = %err, "dump read failed");
                None
            }
        };

        for offset in 0..PAGES_PER_READ {
            let page = start + offset;
            if page >= page_count {
                break;
            }
            let data = chunk.map(|bytes| {
                let at = offset as usize * PAGE_SIZE;
                let mut out = [0u8; PAGE_SIZE];
                out.copy_from_slice(&bytes[at..at + PAGE_SIZE]);
                out
            });
            pages.push(PageDump { page, data });
        }
    }

    debug!(%uid, pages = pages.len(), "memory dumped");
    pages
}
