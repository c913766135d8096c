/// Notifications from the reader thread to whoever draws the plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    TitlePublished(String),
    SeriesResynced { discarded: usize },
    FrameDropped { reason: String },
    StreamRealigned { skipped: usize },
    Stopped { reason: String },
}
