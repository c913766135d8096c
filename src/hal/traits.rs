use anyhow::Result;
use std::io::Read;

/// A byte stream the frame reader can consume.
///
/// Implementations should return `ErrorKind::TimedOut` (or `WouldBlock`)
/// when no data arrives within their read timeout instead of blocking
/// forever, so a stop request is noticed promptly.
pub type BoxedTransport = Box<dyn Read + Send>;

/// Trait implemented by transport drivers that can open a telemetry stream
pub trait TransportDriver: Send + Sync {
    /// Unique driver identifier (e.g., "serial", "simulated")
    fn driver_id(&self) -> &str;

    /// Human-readable description for logs and the status line
    fn describe(&self) -> String;

    /// Open the underlying connection
    fn open(&self) -> Result<BoxedTransport>;
}
