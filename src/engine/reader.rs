use super::{ReaderEvent, ReaderState, RunFlag};
use crate::core::{PushOutcome, Sample, Telemetry};
use crate::observability::ReaderMetrics;
use crate::protocol::{
    decode_title, FrameError, RawFrame, FIELD_WIDTH, FRAME_LEN, MAX_LINE_LEN, MAX_RESYNC_SCAN,
    TERMINATOR,
};
use crate::resilience::{ErrorPolicy, FrameGuard, Recovery};
use crossbeam_channel::Sender;
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Why a reader loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    /// Run flag lowered between frames
    StopRequested,
    /// Run flag lowered while waiting on the transport; the partial frame
    /// was abandoned
    CancelledMidFrame,
}

/// Decodes the fixed-width telemetry protocol from a byte stream.
///
/// The transport is any `Read`. Timeouts from it are not errors: they are
/// the points where a stop request gets noticed during a blocking read.
pub struct FrameReader<R> {
    transport: R,
    run_flag: RunFlag,
    state: ReaderState,
    guard: FrameGuard,
    metrics: Arc<ReaderMetrics>,
    events: Option<Sender<ReaderEvent>>,
    /// Bytes already pulled off the transport that belong to the next frame
    pushback: VecDeque<u8>,
    title: Option<String>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(transport: R, run_flag: RunFlag) -> Self {
        Self {
            transport,
            run_flag,
            state: ReaderState::AwaitingTitle,
            guard: FrameGuard::new(ErrorPolicy::default()),
            metrics: Arc::new(ReaderMetrics::new()),
            events: None,
            pushback: VecDeque::new(),
            title: None,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.guard = FrameGuard::new(policy);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ReaderMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_events(mut self, events: Sender<ReaderEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    /// Stream title, once `start` has read it
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn metrics(&self) -> Arc<ReaderMetrics> {
        self.metrics.clone()
    }

    fn emit(&self, event: ReaderEvent) {
        if let Some(tx) = &self.events {
            // Nobody listening is fine
            let _ = tx.send(event);
        }
    }

    fn transition_to(&mut self, next: ReaderState) {
        if !self.state.can_transition_to(&next) {
            log::warn!(
                "Ignoring reader transition {} -> {}",
                self.state.name(),
                next.name()
            );
            return;
        }
        self.state = next;
    }

    /// Fill `buf` completely, retrying on timeouts until the run flag drops
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), FrameError> {
        let mut filled = 0;

        while filled < buf.len() {
            if let Some(byte) = self.pushback.pop_front() {
                buf[filled] = byte;
                filled += 1;
                continue;
            }

            match self.transport.read(&mut buf[filled..]) {
                Ok(0) => return Err(FrameError::Disconnected),
                Ok(n) => filled += n,
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                    ) =>
                {
                    if self.run_flag.stop_requested() {
                        return Err(FrameError::Cancelled);
                    }
                }
                Err(e) => return Err(FrameError::Io(e)),
            }
        }

        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, FrameError> {
        let mut byte = [0u8; 1];
        self.fill(&mut byte)?;
        Ok(byte[0])
    }

    /// Skip everything up to and including the next newline
    fn discard_line(&mut self) -> Result<usize, FrameError> {
        let mut count = 0;
        loop {
            let byte = self.read_byte()?;
            count += 1;
            if byte == b'\n' {
                return Ok(count);
            }
            if count >= MAX_LINE_LEN {
                return Err(FrameError::LineTooLong {
                    limit: MAX_LINE_LEN,
                });
            }
        }
    }

    /// Startup sequence: drop the (possibly partial) first line, then read
    /// the title field. Returns the title verbatim.
    pub fn start(&mut self) -> Result<String, FrameError> {
        if self.state != ReaderState::AwaitingTitle {
            return Err(FrameError::AlreadyStarted);
        }

        let skipped = self.discard_line()?;
        log::debug!("Discarded {} byte startup line", skipped);

        let mut field = [0u8; FIELD_WIDTH];
        self.fill(&mut field)?;
        let title = decode_title(&field)?;

        self.transition_to(ReaderState::Streaming);
        log::info!("Stream title: {:?}", title);
        self.title = Some(title.clone());
        Ok(title)
    }

    /// Read one whole frame without interpreting it
    pub fn read_raw(&mut self) -> Result<[u8; FRAME_LEN], FrameError> {
        let mut bytes = [0u8; FRAME_LEN];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Read and decode one frame
    pub fn read_frame(&mut self) -> Result<Sample, FrameError> {
        let bytes = self.read_raw()?;
        let raw = RawFrame::from_bytes(&bytes);
        log::trace!("Frame label {:?}", raw.label_lossy());
        raw.decode()
    }

    /// Recover frame alignment after a bad terminator.
    ///
    /// If the rejected frame already contains a terminator, the bytes after
    /// it are the start of the next frame and are replayed. Otherwise the
    /// transport is scanned until a terminator shows up, and the
    /// `FRAME_LEN` bytes ending at it are replayed as the next frame.
    /// Returns how many bytes were thrown away.
    pub fn realign(&mut self, rejected: &[u8; FRAME_LEN]) -> Result<usize, FrameError> {
        let last_terminator = rejected
            .windows(FIELD_WIDTH)
            .rposition(|w| w == TERMINATOR);

        if let Some(pos) = last_terminator {
            let boundary = pos + FIELD_WIDTH;
            self.replay(&rejected[boundary..]);
            return Ok(boundary);
        }

        // Last FRAME_LEN bytes seen, the rejected frame first
        let mut tail: VecDeque<u8> = rejected.iter().copied().collect();
        let mut scanned = 0;

        while scanned < MAX_RESYNC_SCAN {
            let byte = self.read_byte()?;
            scanned += 1;
            tail.pop_front();
            tail.push_back(byte);
            if tail.range(FRAME_LEN - FIELD_WIDTH..).eq(TERMINATOR.iter()) {
                let candidate: Vec<u8> = tail.into_iter().collect();
                self.replay(&candidate);
                return Ok(scanned);
            }
        }

        Err(FrameError::ResyncFailed { scanned })
    }

    /// Queue `bytes` to be read again before anything already queued
    fn replay(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().rev() {
            self.pushback.push_front(byte);
        }
    }

    fn finish(&mut self, result: Result<ReaderExit, FrameError>) -> Result<ReaderExit, FrameError> {
        let reason = match &result {
            Ok(ReaderExit::StopRequested) => "stop requested".to_string(),
            Ok(ReaderExit::CancelledMidFrame) => "stop requested mid-frame".to_string(),
            Err(e) => e.to_string(),
        };

        match &result {
            Ok(_) => log::info!(
                "Frame reader stopped ({}) after {} frames",
                reason,
                self.metrics.frames_decoded()
            ),
            Err(e) => log::error!("Frame reader failed: {}", e),
        }

        self.transition_to(ReaderState::Stopped {
            reason: reason.clone(),
        });
        self.emit(ReaderEvent::Stopped { reason });
        result
    }

    /// Apply a policy decision to a frame that failed to decode
    fn recover(
        &mut self,
        err: FrameError,
        bytes: &[u8; FRAME_LEN],
    ) -> Result<(), FrameError> {
        let reason = err.to_string();
        let recovery = self.guard.handle(err)?;

        self.metrics.record_frame_dropped();
        log::warn!("Dropped frame: {}", reason);
        self.emit(ReaderEvent::FrameDropped { reason });

        if recovery == Recovery::Realign {
            let skipped = self.realign(bytes)?;
            self.metrics.record_realignment(skipped);
            log::warn!("Realigned stream after skipping {} bytes", skipped);
            self.emit(ReaderEvent::StreamRealigned { skipped });
        }

        Ok(())
    }

    /// Read frames into `telemetry` until the run flag drops or a fatal
    /// error occurs. Performs the startup sequence first if needed.
    pub fn run(mut self, telemetry: &Telemetry) -> Result<ReaderExit, FrameError> {
        if self.state == ReaderState::AwaitingTitle {
            match self.start() {
                Ok(_) => {}
                Err(FrameError::Cancelled) => {
                    return self.finish(Ok(ReaderExit::CancelledMidFrame));
                }
                Err(e) => return self.finish(Err(e)),
            }
        }

        // Also covers callers that ran `start` themselves
        if let Some(title) = self.title.clone() {
            telemetry.publish_title(title.clone());
            self.emit(ReaderEvent::TitlePublished(title));
        }

        log::info!("Frame reader streaming ({} policy)", self.guard.policy().name());

        loop {
            if self.run_flag.stop_requested() {
                return self.finish(Ok(ReaderExit::StopRequested));
            }

            let bytes = match self.read_raw() {
                Ok(bytes) => bytes,
                Err(FrameError::Cancelled) => {
                    return self.finish(Ok(ReaderExit::CancelledMidFrame));
                }
                Err(e) => return self.finish(Err(e)),
            };

            let sample = match RawFrame::from_bytes(&bytes).decode() {
                Ok(sample) => sample,
                Err(err) => match self.recover(err, &bytes) {
                    Ok(()) => continue,
                    Err(FrameError::Cancelled) => {
                        return self.finish(Ok(ReaderExit::CancelledMidFrame));
                    }
                    Err(fatal) => return self.finish(Err(fatal)),
                },
            };

            self.guard.record_success();
            self.metrics.record_frame_decoded();
            log::trace!("t={} v={}", sample.timestamp, sample.value);

            if let PushOutcome::Resynced { discarded } = telemetry.push_sample(sample) {
                self.metrics.record_series_resync();
                log::debug!(
                    "Timestamp went back to {}; discarded {} samples",
                    sample.timestamp,
                    discarded
                );
                self.emit(ReaderEvent::SeriesResynced { discarded });
            }
        }
    }
}

/// Run `reader` on a blocking thread of the tokio runtime
pub fn spawn_reader<R>(
    reader: FrameReader<R>,
    telemetry: Arc<Telemetry>,
) -> JoinHandle<Result<ReaderExit, FrameError>>
where
    R: Read + Send + 'static,
{
    tokio::task::spawn_blocking(move || reader.run(&telemetry))
}
