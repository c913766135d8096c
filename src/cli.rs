use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use telemetry_viewer::config::ConfigOverrides;
use telemetry_viewer::resilience::ErrorPolicy;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    /// End the stream on the first bad frame
    Stop,
    /// Drop bad frames and realign
    Skip,
}

#[derive(Parser, Debug)]
#[command(
    name = "telemetry-viewer",
    version,
    about = "Live scrolling plot of framed telemetry from a serial port"
)]
pub struct Cli {
    /// JSON config file
    #[arg(short, long, env = "TELEMETRY_VIEWER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serial device, e.g. /dev/ttyUSB0 or COM4
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Serial read timeout; bounds how long quitting can take on an idle line
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Redraw interval
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// What to do with malformed frames
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Read from the built-in simulated device instead of a port
    #[arg(long)]
    pub simulate: bool,

    /// Log plot updates instead of drawing a chart
    #[arg(long)]
    pub headless: bool,

    /// List serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Write logs here (the chart owns the terminal otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port.clone(),
            baud_rate: self.baud,
            read_timeout_ms: self.timeout_ms,
            tick_ms: self.tick_ms,
            policy: self.policy.map(|p| match p {
                PolicyArg::Stop => ErrorPolicy::Stop,
                PolicyArg::Skip => ErrorPolicy::skip_frame(),
            }),
            simulate: self.simulate,
            headless: self.headless,
        }
    }
}
