//! Error types for clipboard operations.

use thiserror::Error;

/// Result type for clipboard operations
pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// Errors that can occur during clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Backend error (OS clipboard, worker thread, etc.)
    #[error("backend error: {0}")]
    Backend(String),

    /// The platform rejected the transaction or never handed the copy event
    /// to the intercept
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),

    /// No copy event was delivered within the configured bound
    #[error("no copy event delivered within {0}ms")]
    CopyEventTimeout(u64),

    /// Invalid state for operation
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardError {
    /// Returns true if this error means the clipboard did not receive the
    /// transaction. These are surfaced to the user as a failed copy.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteFailed(_) | Self::CopyEventTimeout(_))
    }

    /// Returns true if retrying the copy may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CopyEventTimeout(_) | Self::InvalidState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClipboardError::CopyEventTimeout(2000);
        assert_eq!(err.to_string(), "no copy event delivered within 2000ms");

        let err = ClipboardError::WriteFailed("denied".to_string());
        assert_eq!(err.to_string(), "clipboard write failed: denied");
    }

    #[test]
    fn test_is_write_failure() {
        assert!(ClipboardError::WriteFailed("x".to_string()).is_write_failure());
        assert!(ClipboardError::CopyEventTimeout(10).is_write_failure());
        assert!(!ClipboardError::InvalidState("armed".to_string()).is_write_failure());
        assert!(!ClipboardError::Backend("x".to_string()).is_write_failure());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ClipboardError::CopyEventTimeout(10).is_recoverable());
        assert!(ClipboardError::InvalidState("armed".to_string()).is_recoverable());
        assert!(!ClipboardError::WriteFailed("x".to_string()).is_recoverable());
    }
}
