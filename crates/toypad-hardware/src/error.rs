//! Error types for reader operations.
//!
//! This module defines error types for contactless reader operations,
//! covering device disconnection, timeouts, transport errors, password
//! rejection and incomplete reads.

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during reader operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HardwareError {
    /// Reader is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Operation timed out after specified duration.
    #[error("Operation timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Transport error between host and reader.
    #[error("Communication error: {message}")]
    CommunicationError { message: String },

    /// The tag rejected the password.
    #[error("Authentication rejected by tag {uid}")]
    AuthenticationRejected { uid: String },

    /// The tag answered a READ with a NAK or too few bytes.
    #[error("Card read error: {message}")]
    CardReadError { message: String },
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a new communication error.
    pub fn communication(message: impl Into<String>) -> Self {
        Self::CommunicationError {
            message: message.into(),
        }
    }

    /// Create a new authentication rejected error.
    pub fn authentication_rejected(uid: impl Into<String>) -> Self {
        Self::AuthenticationRejected { uid: uid.into() }
    }

    /// Create a new card read error.
    pub fn card_read(message: impl Into<String>) -> Self {
        Self::CardReadError {
            message: message.into(),
        }
    }

    /// Whether the tag itself refused the password.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRejected { .. })
    }

    /// Whether the tag answered but the data was unusable.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::CardReadError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("PN532");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: PN532");
    }

    #[test]
    fn test_timeout_error() {
        let error = HardwareError::timeout(3000);
        assert_eq!(error.to_string(), "Operation timeout after 3000ms");
    }

    #[test]
    fn test_authentication_rejected() {
        let error = HardwareError::authentication_rejected("04-A1-B2-C3-D4-E5-F6");
        assert!(error.is_authentication());
        assert!(!error.is_read_failure());
        assert_eq!(
            error.to_string(),
            "Authentication rejected by tag 04-A1-B2-C3-D4-E5-F6"
        );
    }

    #[test]
    fn test_card_read_error() {
        let error = HardwareError::card_read("NAK 0x0");
        assert!(error.is_read_failure());
        assert_eq!(error.to_string(), "Card read error: NAK 0x0");
    }
}
