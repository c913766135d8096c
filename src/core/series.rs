use super::Sample;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// What a push did to the series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Appended,
    /// Timestamp went backwards; `discarded` older samples were dropped and
    /// the new sample now starts the series.
    Resynced { discarded: usize },
}

/// Parallel `times`/`values` sequences with the backward-jump resync rule.
///
/// `times[i]` is always the timestamp of `values[i]`; both vectors are only
/// ever mutated together.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    times: Vec<i64>,
    values: Vec<i64>,
    generation: u64,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, then resync if its timestamp is older than the
    /// previous one. A device that restarts its clock begins a fresh series
    /// instead of drawing a jump back in time.
    pub fn push(&mut self, sample: Sample) -> PushOutcome {
        self.times.push(sample.timestamp);
        self.values.push(sample.value);
        self.generation += 1;

        let n = self.times.len();
        if n >= 2 && self.times[n - 1] < self.times[n - 2] {
            let discarded = n - 1;
            self.times.clear();
            self.values.clear();
            self.times.push(sample.timestamp);
            self.values.push(sample.value);
            return PushOutcome::Resynced { discarded };
        }

        PushOutcome::Appended
    }

    pub fn clear(&mut self) {
        self.times.clear();
        self.values.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn last(&self) -> Option<Sample> {
        match (self.times.last(), self.values.last()) {
            (Some(&t), Some(&v)) => Some(Sample::new(t, v)),
            _ => None,
        }
    }

    /// Bumped on every mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            times: self.times.clone(),
            values: self.values.clone(),
            generation: self.generation,
        }
    }
}

/// Immutable copy of a [`TimeSeries`] handed to the display side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesSnapshot {
    pub times: Vec<i64>,
    pub values: Vec<i64>,
    pub generation: u64,
}

impl SeriesSnapshot {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last(&self) -> Option<Sample> {
        match (self.times.last(), self.values.last()) {
            (Some(&t), Some(&v)) => Some(Sample::new(t, v)),
            _ => None,
        }
    }

    /// Points in the shape chart widgets expect
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&t, &v)| (t as f64, v as f64))
            .collect()
    }
}

/// State shared between the frame reader thread and the display loop
#[derive(Debug, Default)]
pub struct Telemetry {
    series: Mutex<TimeSeries>,
    title: OnceLock<String>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TimeSeries> {
        self.series
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append and resync under one lock, so readers never see the two
    /// vectors disagree.
    pub fn push_sample(&self, sample: Sample) -> PushOutcome {
        self.lock().push(sample)
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        self.lock().snapshot()
    }

    /// Drop all samples, e.g. when the user wipes the plot
    pub fn clear(&self) {
        self.lock().clear()
    }

    /// Copy the series only if it changed after `generation`
    pub fn snapshot_if_changed(&self, generation: u64) -> Option<SeriesSnapshot> {
        let series = self.lock();
        if series.generation() == generation {
            None
        } else {
            Some(series.snapshot())
        }
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Publish the stream title. Only the first call has any effect.
    pub fn publish_title(&self, title: impl Into<String>) -> bool {
        self.title.set(title.into()).is_ok()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.get().map(String::as_str)
    }
}
