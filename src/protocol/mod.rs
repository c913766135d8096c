pub mod error;
pub mod frame;

pub use error::FrameError;
pub use frame::{
    decode_number, decode_title, validate_terminator, FrameField, RawFrame, FIELD_WIDTH,
    FRAME_LEN, MAX_LINE_LEN, MAX_RESYNC_SCAN, TERMINATOR,
};
