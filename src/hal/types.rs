use serde::{Deserialize, Serialize};
use serialport::{DataBits, Parity as SpParity, StopBits};

/// Parity setting for serial port configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl Parity {
    pub fn to_serialport(self) -> SpParity {
        match self {
            Parity::None => SpParity::None,
            Parity::Odd => SpParity::Odd,
            Parity::Even => SpParity::Even,
        }
    }

    /// Single-letter form used in "8N1" style descriptions
    pub fn letter(self) -> char {
        match self {
            Parity::None => 'N',
            Parity::Odd => 'O',
            Parity::Even => 'E',
        }
    }
}

/// Serial port configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
    /// Bounds how long a stop request can go unnoticed on an idle line
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115_200,
            data_bits: 8,
            stop_bits: 1,
            parity: Parity::None,
            read_timeout_ms: 100,
        }
    }
}

impl SerialConfig {
    pub fn data_bits(&self) -> DataBits {
        match self.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            _ => DataBits::Eight,
        }
    }

    pub fn stop_bits(&self) -> StopBits {
        match self.stop_bits {
            2 => StopBits::Two,
            _ => StopBits::One,
        }
    }

    /// e.g. "/dev/ttyUSB0 @ 115200 8N1"
    pub fn describe(&self) -> String {
        format!(
            "{} @ {} {}{}{}",
            self.port,
            self.baud_rate,
            self.data_bits,
            self.parity.letter(),
            self.stop_bits
        )
    }
}

/// Settings for the in-process simulated device
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub title: String,
    /// Delay between frames; 0 emits as fast as the reader consumes
    pub interval_ms: u64,
    /// Restart the device clock after this many frames
    pub reset_every: Option<u64>,
    pub amplitude: i64,
    pub offset: i64,
    /// Frames per sine period
    pub period: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            title: "SimWave".to_string(),
            interval_ms: 20,
            reset_every: Some(500),
            amplitude: 100,
            offset: 0,
            period: 100,
        }
    }
}
