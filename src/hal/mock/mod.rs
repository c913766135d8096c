pub mod scripted;
pub mod simulated;

pub use scripted::{ScriptEnd, ScriptedTransport};
pub use simulated::{SimulatedDriver, SimulatedTelemetrySource};
