pub mod sample;
pub mod series;

pub use sample::Sample;
pub use series::{PushOutcome, SeriesSnapshot, Telemetry, TimeSeries};
