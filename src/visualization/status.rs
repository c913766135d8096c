use crate::engine::ReaderEvent;
use crossbeam_channel::{Receiver, TryRecvError};

/// Folds reader events into the text shown around the chart
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    title: Option<String>,
    last_notice: Option<String>,
    stopped: Option<String>,
    disconnected: bool,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: ReaderEvent) {
        match event {
            ReaderEvent::TitlePublished(title) => self.title = Some(title),
            ReaderEvent::SeriesResynced { discarded } => {
                self.last_notice = Some(format!("clock reset, dropped {} samples", discarded));
            }
            ReaderEvent::FrameDropped { reason } => {
                self.last_notice = Some(format!("bad frame: {}", reason));
            }
            ReaderEvent::StreamRealigned { skipped } => {
                self.last_notice = Some(format!("realigned after {} bytes", skipped));
            }
            ReaderEvent::Stopped { reason } => self.stopped = Some(reason),
        }
    }

    /// Apply every event currently queued without blocking
    pub fn drain(&mut self, events: &Receiver<ReaderEvent>) {
        loop {
            match events.try_recv() {
                Ok(event) => self.apply(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }
    }

    /// Chart heading: the stream title with its line ending removed
    pub fn heading(&self) -> String {
        match &self.title {
            Some(title) => title.trim().to_string(),
            None => "waiting for stream...".to_string(),
        }
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    pub fn stopped(&self) -> Option<&str> {
        self.stopped.as_deref()
    }

    /// True once the reader reported its exit or dropped its sender
    pub fn reader_finished(&self) -> bool {
        self.stopped.is_some() || self.disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_applies_in_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(ReaderEvent::TitlePublished("MyPlotX\n".to_string())).unwrap();
        tx.send(ReaderEvent::SeriesResynced { discarded: 4 }).unwrap();

        let mut board = StatusBoard::new();
        board.drain(&rx);
        assert_eq!(board.heading(), "MyPlotX");
        assert_eq!(board.last_notice(), Some("clock reset, dropped 4 samples"));
        assert!(!board.reader_finished());

        drop(tx);
        board.drain(&rx);
        assert!(board.reader_finished());
    }
}
