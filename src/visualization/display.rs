use super::{PlotFeed, PlotFrame, StatusBoard};
use crate::engine::{ReaderEvent, RunFlag};
use crate::observability::ReaderMonitor;
use crossbeam_channel::Receiver;
use std::time::Duration;

/// Everything a display loop needs, wired up by the binary
pub struct DisplayContext {
    pub feed: PlotFeed,
    pub events: Receiver<ReaderEvent>,
    pub monitor: ReaderMonitor,
    pub run_flag: RunFlag,
    pub tick: Duration,
}

impl DisplayContext {
    /// One display tick: absorb reader events, then pull the plot data
    pub fn refresh(&mut self, board: &mut StatusBoard) -> PlotFrame {
        board.drain(&self.events);
        self.feed.tick()
    }

    /// Status text under the chart
    pub fn status_line(&self, board: &StatusBoard, frame: &PlotFrame) -> String {
        let mut line = match frame.series.last() {
            Some(s) => format!(
                "{} samples | last t={} v={} | {}",
                frame.series.len(),
                s.timestamp,
                s.value,
                self.monitor.status_line()
            ),
            None => format!("no samples | {}", self.monitor.status_line()),
        };

        if let Some(reason) = board.stopped() {
            line.push_str(&format!(" | reader stopped: {}", reason));
        } else if let Some(notice) = board.last_notice() {
            line.push_str(&format!(" | {}", notice));
        }
        line
    }
}
