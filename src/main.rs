use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::sync::Arc;
use telemetry_viewer::config::ViewerConfig;
use telemetry_viewer::core::Telemetry;
use telemetry_viewer::engine::{spawn_reader, FrameReader, RunFlag};
use telemetry_viewer::hal::list_ports;
use telemetry_viewer::observability::{ReaderMetrics, ReaderMonitor};
use telemetry_viewer::visualization::{run_headless, run_terminal, DisplayContext, PlotFeed};

mod cli;

use cli::Cli;

/// Build the logger. `env_filters` is the `RUST_LOG` value, if any.
///
/// With no log file in TUI mode nothing may reach stderr, so env filters
/// are not applied at all.
fn build_logger(
    cli: &Cli,
    headless: bool,
    env_filters: Option<&str>,
) -> Result<env_logger::Logger> {
    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would scribble over the chart
        None if !headless => {
            builder.filter_level(log::LevelFilter::Off);
            return Ok(builder.build());
        }
        None => {}
    }

    builder.filter_level(level);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    Ok(builder.build())
}

fn init_logging(cli: &Cli, headless: bool) -> Result<()> {
    let env_filters = std::env::var("RUST_LOG").ok();
    let logger = build_logger(cli, headless, env_filters.as_deref())?;

    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger)).context("Failed to install logger")?;
    log::set_max_level(max_level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_ports {
        for port in list_ports()? {
            println!(
                "{}\t{}\t{}",
                port.port_name,
                port.port_type,
                port.product.unwrap_or_default()
            );
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    cli.overrides().apply(&mut config);

    init_logging(&cli, config.display.headless)?;

    let driver = config.driver();
    log::info!("Opening {}", driver.describe());
    let transport = driver.open()?;

    let telemetry = Arc::new(Telemetry::new());
    let metrics = Arc::new(ReaderMetrics::new());
    let run_flag = RunFlag::new();
    let (events_tx, events_rx) = crossbeam_channel::unbounded();

    let reader = FrameReader::new(transport, run_flag.clone())
        .with_policy(config.reader)
        .with_metrics(metrics.clone())
        .with_events(events_tx);
    let reader_handle = spawn_reader(reader, telemetry.clone());

    let ctx = DisplayContext {
        feed: PlotFeed::new(telemetry, config.window),
        events: events_rx,
        monitor: ReaderMonitor::new(metrics),
        run_flag: run_flag.clone(),
        tick: config.display.tick(),
    };

    let display_result = if config.display.headless {
        run_headless(ctx).await
    } else {
        run_terminal(ctx).await
    };

    // The read timeout bounds how long this join can take
    run_flag.request_stop();
    match reader_handle.await.context("Frame reader thread panicked")? {
        Ok(exit) => log::info!("Reader exited: {:?}", exit),
        Err(e) => {
            display_result?;
            return Err(e).context("Frame reader failed");
        }
    }

    display_result
}
