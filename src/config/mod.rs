use crate::hal::mock::SimulatedDriver;
use crate::hal::{SerialConfig, SerialDriver, SimulatorConfig, TransportDriver};
use crate::resilience::ErrorPolicy;
use crate::visualization::PlotWindow;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Redraw cadence and output mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub tick_ms: u64,
    pub headless: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            headless: false,
        }
    }
}

impl DisplayConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Top-level settings, read from a JSON file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub transport: SerialConfig,
    pub window: PlotWindow,
    pub reader: ErrorPolicy,
    pub display: DisplayConfig,
    /// When set, frames come from the built-in simulator instead of a port
    pub simulate: Option<SimulatorConfig>,
}

impl ViewerConfig {
    pub fn from_json(config: Value) -> Result<Self> {
        serde_json::from_value(config).context("Invalid viewer configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Transport to open: the simulator if configured, else the serial port
    pub fn driver(&self) -> Box<dyn TransportDriver> {
        match &self.simulate {
            Some(sim) => Box::new(SimulatedDriver::new(sim.clone())),
            None => Box::new(SerialDriver::new(self.transport.clone())),
        }
    }
}

/// Command-line values that win over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<String>,
    pub baud_rate: Option<u32>,
    pub read_timeout_ms: Option<u64>,
    pub tick_ms: Option<u64>,
    pub policy: Option<ErrorPolicy>,
    pub simulate: bool,
    pub headless: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(port) = &self.port {
            config.transport.port = port.clone();
        }
        if let Some(baud) = self.baud_rate {
            config.transport.baud_rate = baud;
        }
        if let Some(timeout) = self.read_timeout_ms {
            config.transport.read_timeout_ms = timeout;
        }
        if let Some(tick) = self.tick_ms {
            config.display.tick_ms = tick;
        }
        if let Some(policy) = self.policy {
            config.reader = policy;
        }
        if self.simulate && config.simulate.is_none() {
            config.simulate = Some(SimulatorConfig::default());
        }
        if self.headless {
            config.display.headless = true;
        }
    }
}
