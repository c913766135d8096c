use super::FrameError;
use crate::core::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width in bytes of every field on the wire
pub const FIELD_WIDTH: usize = 8;

/// Label, timestamp, value and terminator
pub const FRAME_LEN: usize = FIELD_WIDTH * 4;

/// Literal closing every frame
pub const TERMINATOR: &[u8; FIELD_WIDTH] = b"end_msg\n";

/// Upper bound on the line discarded at startup
pub const MAX_LINE_LEN: usize = 4096;

/// Upper bound on bytes skipped while searching for a terminator
pub const MAX_RESYNC_SCAN: usize = 4096;

/// Position of a field within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameField {
    Title,
    Label,
    Timestamp,
    Value,
    Terminator,
}

impl FrameField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Label => "label",
            Self::Timestamp => "timestamp",
            Self::Value => "value",
            Self::Terminator => "terminator",
        }
    }
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One undecoded frame exactly as it came off the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub label: [u8; FIELD_WIDTH],
    pub timestamp: [u8; FIELD_WIDTH],
    pub value: [u8; FIELD_WIDTH],
    pub terminator: [u8; FIELD_WIDTH],
}

impl RawFrame {
    /// Split a contiguous frame buffer into its four fields
    pub fn from_bytes(bytes: &[u8; FRAME_LEN]) -> Self {
        let field = |i: usize| {
            let mut out = [0u8; FIELD_WIDTH];
            out.copy_from_slice(&bytes[i * FIELD_WIDTH..(i + 1) * FIELD_WIDTH]);
            out
        };

        Self {
            label: field(0),
            timestamp: field(1),
            value: field(2),
            terminator: field(3),
        }
    }

    /// Validate alignment first, then decode the numeric fields.
    ///
    /// A misaligned stream shows up as `BadTerminator` rather than as a
    /// parse error on whatever bytes happened to land in the number fields.
    pub fn decode(&self) -> Result<Sample, FrameError> {
        validate_terminator(&self.terminator)?;
        let timestamp = decode_number(FrameField::Timestamp, &self.timestamp)?;
        let value = decode_number(FrameField::Value, &self.value)?;
        Ok(Sample::new(timestamp, value))
    }

    /// Label text, for logging only
    pub fn label_lossy(&self) -> String {
        String::from_utf8_lossy(&self.label).into_owned()
    }
}

/// Decode an ASCII decimal field.
///
/// Accepts surrounding ASCII whitespace and one optional leading sign.
pub fn decode_number(field: FrameField, raw: &[u8]) -> Result<i64, FrameError> {
    let invalid = || FrameError::InvalidNumber {
        field,
        raw: raw.to_vec(),
    };

    let text = std::str::from_utf8(raw).map_err(|_| invalid())?.trim_ascii();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    text.parse::<i64>().map_err(|_| invalid())
}

/// Decode the stream title, keeping the bytes verbatim
pub fn decode_title(raw: &[u8]) -> Result<String, FrameError> {
    String::from_utf8(raw.to_vec()).map_err(|e| FrameError::InvalidTitle {
        raw: e.into_bytes(),
    })
}

pub fn validate_terminator(raw: &[u8]) -> Result<(), FrameError> {
    if raw == TERMINATOR {
        Ok(())
    } else {
        Err(FrameError::BadTerminator { raw: raw.to_vec() })
    }
}
