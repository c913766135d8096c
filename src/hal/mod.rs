pub mod mock;
pub mod serial;
pub mod traits;
pub mod types;

pub use serial::{list_ports, open_serial, SerialDriver, SerialPortInfo};
pub use traits::{BoxedTransport, TransportDriver};
pub use types::{Parity, SerialConfig, SimulatorConfig};
