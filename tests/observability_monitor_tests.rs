use std::sync::Arc;
use telemetry_viewer::observability::{ReaderMetrics, ReaderMonitor};

#[test]
fn test_monitor_report() {
    let metrics = Arc::new(ReaderMetrics::new());

    metrics.record_frame_decoded();
    metrics.record_frame_decoded();
    metrics.record_frame_dropped();
    metrics.record_series_resync();
    metrics.record_realignment(37);

    let monitor = ReaderMonitor::new(metrics.clone());
    let report = monitor.generate_report();

    assert!(report.contains("2 decoded"));
    assert!(report.contains("1 dropped"));
    assert!(report.contains("1 series"));
    assert!(report.contains("37 bytes skipped"));
    assert_eq!(
        monitor.status_line(),
        "decoded 2 | dropped 1 | resyncs 1 | realigned 1"
    );
}

#[test]
fn test_monitor_report_without_frames() {
    let monitor = ReaderMonitor::new(Arc::new(ReaderMetrics::new()));
    assert_eq!(monitor.generate_report(), "No frames received");
}

#[test]
fn test_metrics_shared_across_threads() {
    let metrics = Arc::new(ReaderMetrics::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let metrics = metrics.clone();
            std::thread::spawn(move || {
                for _ in 0..250 {
                    metrics.record_frame_decoded();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.frames_decoded, 1000);
    assert_eq!(serde_json::to_value(snapshot).unwrap()["frames_decoded"], 1000);
}
