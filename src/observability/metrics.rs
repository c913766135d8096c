use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the frame reader thread and read by the display
#[derive(Debug, Default)]
pub struct ReaderMetrics {
    frames_decoded: AtomicU64,
    frames_dropped: AtomicU64,
    series_resyncs: AtomicU64,
    stream_realignments: AtomicU64,
    bytes_skipped: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub frames_decoded: u64,
    pub frames_dropped: u64,
    pub series_resyncs: u64,
    pub stream_realignments: u64,
    pub bytes_skipped: u64,
}

impl ReaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub fn series_resyncs(&self) -> u64 {
        self.series_resyncs.load(Ordering::Relaxed)
    }

    pub fn stream_realignments(&self) -> u64 {
        self.stream_realignments.load(Ordering::Relaxed)
    }

    pub fn bytes_skipped(&self) -> u64 {
        self.bytes_skipped.load(Ordering::Relaxed)
    }

    pub fn record_frame_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_series_resync(&self) {
        self.series_resyncs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_realignment(&self, skipped: usize) {
        self.stream_realignments.fetch_add(1, Ordering::Relaxed);
        self.bytes_skipped.fetch_add(skipped as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_decoded: self.frames_decoded(),
            frames_dropped: self.frames_dropped(),
            series_resyncs: self.series_resyncs(),
            stream_realignments: self.stream_realignments(),
            bytes_skipped: self.bytes_skipped(),
        }
    }
}
