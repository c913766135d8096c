#![allow(dead_code)]

use telemetry_viewer::hal::mock::{ScriptEnd, ScriptedTransport};

/// One well-formed frame with the given label
pub fn frame_with_label(label: &[u8; 8], t: i64, v: i64) -> Vec<u8> {
    let mut out = label.to_vec();
    out.extend_from_slice(format!("{:08}{:08}", t, v).as_bytes());
    out.extend_from_slice(b"end_msg\n");
    out
}

pub fn frame(t: i64, v: i64) -> Vec<u8> {
    frame_with_label(b"XXXXXXXX", t, v)
}

/// Startup line plus title field
pub fn header(title: &[u8; 8]) -> Vec<u8> {
    let mut out = b"partial line\n".to_vec();
    out.extend_from_slice(title);
    out
}

pub fn stream(title: &[u8; 8], samples: &[(i64, i64)]) -> Vec<u8> {
    let mut out = header(title);
    for &(t, v) in samples {
        out.extend(frame(t, v));
    }
    out
}

pub fn transport(bytes: Vec<u8>, end: ScriptEnd) -> ScriptedTransport {
    ScriptedTransport::from_bytes(bytes, end)
}
