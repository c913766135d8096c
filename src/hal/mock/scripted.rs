use std::collections::VecDeque;
use std::io::{self, Read};
use std::time::Duration;

/// What a [`ScriptedTransport`] does once its chunks run out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEnd {
    /// Report end of stream
    Eof,
    /// Behave like an idle line: every read times out
    Stall,
}

/// Replays canned bytes, one chunk per read call at most.
///
/// Stands in for a serial port in tests: chunk boundaries exercise partial
/// reads, and `ScriptEnd::Stall` reproduces a device that went quiet.
pub struct ScriptedTransport {
    chunks: VecDeque<Vec<u8>>,
    end: ScriptEnd,
    stall_delay: Duration,
}

impl ScriptedTransport {
    pub fn new(chunks: Vec<Vec<u8>>, end: ScriptEnd) -> Self {
        Self {
            chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
            end,
            stall_delay: Duration::from_millis(1),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>, end: ScriptEnd) -> Self {
        Self::new(vec![bytes.into()], end)
    }

    /// Split `bytes` into chunks of at most `size` bytes
    pub fn chunked(bytes: &[u8], size: usize, end: ScriptEnd) -> Self {
        Self::new(bytes.chunks(size.max(1)).map(<[u8]>::to_vec).collect(), end)
    }

    pub fn remaining(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let Some(chunk) = self.chunks.front_mut() else {
            return match self.end {
                ScriptEnd::Eof => Ok(0),
                ScriptEnd::Stall => {
                    std::thread::sleep(self.stall_delay);
                    Err(io::Error::new(io::ErrorKind::TimedOut, "scripted stall"))
                }
            };
        };

        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.chunks.pop_front();
        }
        Ok(n)
    }
}
