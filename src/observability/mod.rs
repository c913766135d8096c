pub mod metrics;
pub mod monitor;

pub use metrics::{MetricsSnapshot, ReaderMetrics};
pub use monitor::ReaderMonitor;
