use super::display::DisplayContext;
use super::StatusBoard;
use anyhow::Result;
use std::future::Future;
use tokio::time::{interval, MissedTickBehavior};

/// Display loop without a terminal UI: logs a summary whenever new samples
/// arrived since the previous tick. Ends on Ctrl-C or when the reader stops.
pub async fn run_headless(ctx: DisplayContext) -> Result<()> {
    run_headless_until(ctx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// [`run_headless`] with a caller-supplied shutdown signal
pub async fn run_headless_until<F>(mut ctx: DisplayContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let mut ticker = interval(ctx.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut board = StatusBoard::new();
    let mut last_generation = None;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                log::info!("Interrupted");
                break;
            }
        }

        let frame = ctx.refresh(&mut board);
        if last_generation != Some(frame.series.generation) {
            last_generation = Some(frame.series.generation);
            log::info!("{}", serde_json::to_string(&frame.summary())?);
        }

        if board.reader_finished() {
            log::info!("{}", ctx.status_line(&board, &frame));
            break;
        }
    }

    ctx.run_flag.request_stop();
    log::info!("{}", ctx.monitor.generate_report());
    Ok(())
}
