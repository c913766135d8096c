use crate::hal::types::SimulatorConfig;
use crate::hal::{BoxedTransport, TransportDriver};
use crate::protocol::{FIELD_WIDTH, TERMINATOR};
use anyhow::Result;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io::{self, Read};
use std::time::{Duration, Instant};

/// Longest a single read waits before reporting `TimedOut`
const POLL_LIMIT: Duration = Duration::from_millis(100);

/// Timestamps are printed as 8 decimal digits
const TIMESTAMP_MODULUS: u64 = 100_000_000;

/// In-process device that speaks the wire protocol.
///
/// Starts with a truncated line, then the title field, then one frame per
/// `interval_ms` carrying a sine-shaped value. If `reset_every` is set the
/// device clock restarts periodically, like a board being reset.
pub struct SimulatedTelemetrySource {
    config: SimulatorConfig,
    pending: VecDeque<u8>,
    frame_counter: u64,
    next_due: Instant,
}

impl SimulatedTelemetrySource {
    pub fn new(config: SimulatorConfig) -> Self {
        let mut pending = VecDeque::with_capacity(FIELD_WIDTH * 8);
        // Opening a port mid-stream usually lands inside a line
        pending.extend(b"sg\n");
        pending.extend(Self::title_field(&config.title));

        Self {
            config,
            pending,
            frame_counter: 0,
            next_due: Instant::now(),
        }
    }

    /// Title padded or truncated to one field, newline-terminated
    fn title_field(title: &str) -> [u8; FIELD_WIDTH] {
        let mut field = [b' '; FIELD_WIDTH];
        for (dst, src) in field.iter_mut().zip(title.bytes().take(FIELD_WIDTH - 1)) {
            *dst = src;
        }
        field[FIELD_WIDTH - 1] = b'\n';
        field
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frame_counter
    }

    /// Device clock for the frame about to be emitted
    fn timestamp(&self) -> u64 {
        let t = match self.config.reset_every {
            Some(n) if n > 0 => self.frame_counter % n,
            _ => self.frame_counter,
        };
        t % TIMESTAMP_MODULUS
    }

    fn value(&self) -> i64 {
        let period = self.config.period.max(1) as f64;
        let phase = 2.0 * PI * (self.frame_counter as f64) / period;
        self.config.offset + (self.config.amplitude as f64 * phase.sin()).round() as i64
    }

    fn emit_frame(&mut self) {
        let timestamp = format!("{:08}", self.timestamp());
        let value = format!("{:08}", self.value().clamp(-9_999_999, 99_999_999));

        self.pending.extend(b"SIM_DATA");
        self.pending.extend(timestamp.as_bytes());
        self.pending.extend(value.as_bytes());
        self.pending.extend(TERMINATOR);

        self.frame_counter += 1;
        self.next_due += Duration::from_millis(self.config.interval_ms);
    }
}

impl Read for SimulatedTelemetrySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.pending.is_empty() {
            let now = Instant::now();
            if now < self.next_due {
                let wait = (self.next_due - now).min(POLL_LIMIT);
                std::thread::sleep(wait);
                if Instant::now() < self.next_due {
                    return Err(io::Error::new(io::ErrorKind::TimedOut, "no frame due yet"));
                }
            }
            self.emit_frame();
        }

        let n = buf.len().min(self.pending.len());
        for (dst, src) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

/// Driver handing out fresh simulated devices
pub struct SimulatedDriver {
    config: SimulatorConfig,
}

impl SimulatedDriver {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }
}

impl TransportDriver for SimulatedDriver {
    fn driver_id(&self) -> &str {
        "simulated"
    }

    fn describe(&self) -> String {
        format!(
            "simulated device \"{}\" every {}ms",
            self.config.title, self.config.interval_ms
        )
    }

    fn open(&self) -> Result<BoxedTransport> {
        Ok(Box::new(SimulatedTelemetrySource::new(self.config.clone())))
    }
}
