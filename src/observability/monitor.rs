use super::ReaderMetrics;
use std::sync::Arc;

/// Formats reader counters for the log and the status line
pub struct ReaderMonitor {
    metrics: Arc<ReaderMetrics>,
}

impl ReaderMonitor {
    pub fn new(metrics: Arc<ReaderMetrics>) -> Self {
        Self { metrics }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.metrics.snapshot();

        if snapshot.frames_decoded == 0 && snapshot.frames_dropped == 0 {
            return "No frames received".to_string();
        }

        format!(
            "=== Reader Metrics ===\n  Frames: {} decoded, {} dropped\n  Resyncs: {} series, {} stream ({} bytes skipped)\n",
            snapshot.frames_decoded,
            snapshot.frames_dropped,
            snapshot.series_resyncs,
            snapshot.stream_realignments,
            snapshot.bytes_skipped
        )
    }

    /// Single-line form for the chart status bar
    pub fn status_line(&self) -> String {
        let s = self.metrics.snapshot();
        format!(
            "decoded {} | dropped {} | resyncs {} | realigned {}",
            s.frames_decoded, s.frames_dropped, s.series_resyncs, s.stream_realignments
        )
    }

    pub fn metrics(&self) -> &Arc<ReaderMetrics> {
        &self.metrics
    }
}
