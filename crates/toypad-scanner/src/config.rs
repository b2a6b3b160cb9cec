use std::time::Duration;

use serde::{Deserialize, Serialize};
use toypad_core::constants::{
    DEFAULT_FAILURE_BACKOFF_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_INTERVAL_MS,
    NTAG213_PAGE_COUNT, PAGE_SIZE, PAYLOAD_PAGE, READ_LEN,
};
use toypad_core::{Error, Result};

/// Timing and addressing for the scan loop.
///
/// Durations serialize as whole milliseconds:
///
/// ```json
/// { "poll_interval_ms": 200, "settle_interval_ms": 1000,
///   "failure_backoff_ms": 1000, "payload_page": 36 }
/// ```
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use toypad_scanner::ScannerConfig;
///
/// let config = ScannerConfig::default().with_poll_interval(Duration::from_millis(50));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Pause after a poll that found no tag.
    #[serde(rename = "poll_interval_ms", with = "millis")]
    pub poll_interval: Duration,

    /// Pause after a tag was reported or debounced.
    #[serde(rename = "settle_interval_ms", with = "millis")]
    pub settle_interval: Duration,

    /// Pause after a failed cycle.
    #[serde(rename = "failure_backoff_ms", with = "millis")]
    pub failure_backoff: Duration,

    /// First page of the identification payload.
    pub payload_page: u8,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            settle_interval: Duration::from_millis(DEFAULT_SETTLE_INTERVAL_MS),
            failure_backoff: Duration::from_millis(DEFAULT_FAILURE_BACKOFF_MS),
            payload_page: PAYLOAD_PAGE,
        }
    }
}

impl ScannerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_settle_interval(mut self, interval: Duration) -> Self {
        self.settle_interval = interval;
        self
    }

    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }

    pub fn with_payload_page(mut self, page: u8) -> Self {
        self.payload_page = page;
        self
    }

    /// Check the configuration before starting a scan loop.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any interval is zero (the loop would
    /// spin) or if a 16-byte read at `payload_page` would run past the end
    /// of an NTAG213.
    pub fn validate(&self) -> Result<()> {
        for (name, interval) in [
            ("poll interval", self.poll_interval),
            ("settle interval", self.settle_interval),
            ("failure backoff", self.failure_backoff),
        ] {
            if interval.is_zero() {
                return Err(Error::Config(format!("{name} must be non-zero")));
            }
        }

        let last_page = self.payload_page as usize + READ_LEN / PAGE_SIZE - 1;
        if last_page >= NTAG213_PAGE_COUNT as usize {
            return Err(Error::Config(format!(
                "payload page {:#04X} reads past the last tag page",
                self.payload_page
            )));
        }

        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
