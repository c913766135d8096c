use super::types::SerialConfig;
use super::{BoxedTransport, TransportDriver};
use anyhow::{Context, Result};
use serde::Serialize;
use serialport::{SerialPort, SerialPortType};
use std::time::Duration;

/// Information about an available serial port
#[derive(Clone, Debug, Serialize)]
pub struct SerialPortInfo {
    pub port_name: String,
    pub port_type: String,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// Open a serial port with a bounded read timeout
pub fn open_serial(config: &SerialConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(&config.port, config.baud_rate)
        .data_bits(config.data_bits())
        .stop_bits(config.stop_bits())
        .parity(config.parity.to_serialport())
        .timeout(Duration::from_millis(config.read_timeout_ms.max(1)))
        .open()
        .with_context(|| format!("Failed to open {}", config.port))?;

    log::info!("Opened {}", config.describe());
    Ok(port)
}

pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;

    Ok(ports
        .into_iter()
        .map(|p| {
            let (port_type, manufacturer, product) = match p.port_type {
                SerialPortType::UsbPort(usb) => ("usb".to_string(), usb.manufacturer, usb.product),
                SerialPortType::PciPort => ("pci".to_string(), None, None),
                SerialPortType::BluetoothPort => ("bluetooth".to_string(), None, None),
                SerialPortType::Unknown => ("unknown".to_string(), None, None),
            };
            SerialPortInfo {
                port_name: p.port_name,
                port_type,
                manufacturer,
                product,
            }
        })
        .collect())
}

/// Driver for a physical serial connection
pub struct SerialDriver {
    config: SerialConfig,
}

impl SerialDriver {
    pub fn new(config: SerialConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl TransportDriver for SerialDriver {
    fn driver_id(&self) -> &str {
        "serial"
    }

    fn describe(&self) -> String {
        self.config.describe()
    }

    fn open(&self) -> Result<BoxedTransport> {
        let port = open_serial(&self.config)?;
        Ok(Box::new(port))
    }
}
