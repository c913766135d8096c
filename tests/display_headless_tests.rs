mod common;

use common::{stream, transport};
use std::sync::Arc;
use std::time::Duration;
use telemetry_viewer::core::Telemetry;
use telemetry_viewer::engine::{spawn_reader, FrameReader, ReaderExit, RunFlag};
use telemetry_viewer::hal::mock::ScriptEnd;
use telemetry_viewer::observability::{ReaderMetrics, ReaderMonitor};
use telemetry_viewer::protocol::FrameError;
use telemetry_viewer::visualization::{
    run_headless, run_headless_until, DisplayContext, PlotFeed, PlotWindow, StatusBoard,
};

fn context(
    telemetry: Arc<Telemetry>,
    metrics: Arc<ReaderMetrics>,
    flag: RunFlag,
) -> (DisplayContext, crossbeam_channel::Sender<telemetry_viewer::engine::ReaderEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let ctx = DisplayContext {
        feed: PlotFeed::new(telemetry, PlotWindow::default()),
        events: rx,
        monitor: ReaderMonitor::new(metrics),
        run_flag: flag,
        tick: Duration::from_millis(5),
    };
    (ctx, tx)
}

#[tokio::test]
async fn test_headless_ends_with_reader() {
    let telemetry = Arc::new(Telemetry::new());
    let metrics = Arc::new(ReaderMetrics::new());
    let flag = RunFlag::new();
    let (ctx, tx) = context(telemetry.clone(), metrics.clone(), flag.clone());

    let bytes = stream(b"Plot1  \n", &[(1, 50), (2, 55), (3, 60)]);
    let reader = FrameReader::new(transport(bytes, ScriptEnd::Eof), flag.clone())
        .with_metrics(metrics.clone())
        .with_events(tx);
    let handle = spawn_reader(reader, telemetry.clone());

    tokio::time::timeout(Duration::from_secs(2), run_headless(ctx))
        .await
        .expect("display loop did not end")
        .unwrap();

    assert!(flag.stop_requested());
    assert!(matches!(handle.await.unwrap(), Err(FrameError::Disconnected)));
    assert_eq!(telemetry.len(), 3);
    assert_eq!(metrics.snapshot().frames_decoded, 3);
}

#[tokio::test]
async fn test_headless_stops_on_shutdown_signal() {
    let telemetry = Arc::new(Telemetry::new());
    let metrics = Arc::new(ReaderMetrics::new());
    let flag = RunFlag::new();
    let (ctx, tx) = context(telemetry.clone(), metrics, flag.clone());

    // The line goes quiet after one frame, so only the signal can end the loop
    let bytes = stream(b"Plot1  \n", &[(1, 50)]);
    let reader = FrameReader::new(transport(bytes, ScriptEnd::Stall), flag.clone()).with_events(tx);
    let handle = spawn_reader(reader, telemetry.clone());

    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
    let display = tokio::spawn(run_headless_until(ctx, async move {
        let _ = signal_rx.await;
    }));

    // Let several ticks pass before signalling
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(!display.is_finished());
    signal_tx.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(2), display)
        .await
        .expect("display loop ignored the signal")
        .unwrap()
        .unwrap();

    assert!(flag.stop_requested());
    let exit = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(exit, ReaderExit::CancelledMidFrame);
    assert_eq!(telemetry.len(), 1);
}

#[test]
fn test_status_line_reports_stop() {
    let telemetry = Arc::new(Telemetry::new());
    let metrics = Arc::new(ReaderMetrics::new());
    let (mut ctx, tx) = context(telemetry.clone(), metrics, RunFlag::new());

    telemetry.push_sample(telemetry_viewer::core::Sample::new(4, -2));
    tx.send(telemetry_viewer::engine::ReaderEvent::Stopped {
        reason: "device disconnected".to_string(),
    })
    .unwrap();

    let mut board = StatusBoard::new();
    let frame = ctx.refresh(&mut board);
    let line = ctx.status_line(&board, &frame);

    assert!(line.starts_with("1 samples | last t=4 v=-2"));
    assert!(line.ends_with("reader stopped: device disconnected"));
    assert!(board.reader_finished());
}
