use super::frame::FrameField;
use thiserror::Error;

/// Everything that can go wrong between the transport and a decoded sample
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport closed")]
    Disconnected,

    #[error("read cancelled by stop request")]
    Cancelled,

    #[error("startup line exceeds {limit} bytes without a newline")]
    LineTooLong { limit: usize },

    #[error("stream title is not valid UTF-8: {raw:?}")]
    InvalidTitle { raw: Vec<u8> },

    #[error("{field} field is not a decimal integer: {:?}", String::from_utf8_lossy(.raw))]
    InvalidNumber { field: FrameField, raw: Vec<u8> },

    #[error("expected end_msg terminator, got {:?}", String::from_utf8_lossy(.raw))]
    BadTerminator { raw: Vec<u8> },

    #[error("no frame terminator found after scanning {scanned} bytes")]
    ResyncFailed { scanned: usize },

    #[error("reader already started")]
    AlreadyStarted,
}

impl FrameError {
    /// Errors confined to a single frame; the stream can continue after them
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidNumber { .. } | Self::BadTerminator { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let bad_number = FrameError::InvalidNumber {
            field: FrameField::Value,
            raw: b"12ab5678".to_vec(),
        };
        let bad_term = FrameError::BadTerminator { raw: b"end_msgX".to_vec() };

        assert!(bad_number.is_recoverable());
        assert!(bad_term.is_recoverable());
        assert!(!FrameError::Disconnected.is_recoverable());
        assert!(!FrameError::Cancelled.is_recoverable());
        assert!(!FrameError::ResyncFailed { scanned: 10 }.is_recoverable());
    }

    #[test]
    fn test_display_includes_raw_text() {
        let err = FrameError::InvalidNumber {
            field: FrameField::Timestamp,
            raw: b"0000x001".to_vec(),
        };
        let msg = err.to_string();
        assert!(msg.contains("timestamp"));
        assert!(msg.contains("0000x001"));
    }
}
