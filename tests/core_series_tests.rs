use telemetry_viewer::core::{PushOutcome, Sample, Telemetry, TimeSeries};

#[test]
fn test_resync_keeps_newest_sample() {
    let mut series = TimeSeries::new();
    for t in [3, 4, 9] {
        assert_eq!(series.push(Sample::new(t, t * 10)), PushOutcome::Appended);
    }

    assert_eq!(
        series.push(Sample::new(2, 7)),
        PushOutcome::Resynced { discarded: 3 }
    );
    assert_eq!(series.times(), &[2]);
    assert_eq!(series.values(), &[7]);
    assert_eq!(series.last(), Some(Sample::new(2, 7)));
}

#[test]
fn test_times_never_decrease() {
    let mut series = TimeSeries::new();
    let stamps = [0, 1, 1, 5, 2, 3, 3, 0, 8, 9, 4];
    for (i, &t) in stamps.iter().enumerate() {
        series.push(Sample::new(t, i as i64));
        assert_eq!(series.times().len(), series.values().len());
        assert!(series.times().windows(2).all(|w| w[0] <= w[1]));
    }
    assert_eq!(series.times(), &[4]);
}

#[test]
fn test_snapshot_is_independent() {
    let telemetry = Telemetry::new();
    telemetry.push_sample(Sample::new(1, 1));
    let before = telemetry.snapshot();

    telemetry.push_sample(Sample::new(2, 2));
    assert_eq!(before.len(), 1);
    assert_eq!(telemetry.len(), 2);
    assert!(telemetry.generation() > before.generation);
}

#[test]
fn test_clear_bumps_generation() {
    let telemetry = Telemetry::new();
    telemetry.push_sample(Sample::new(1, 1));
    let seen = telemetry.generation();

    telemetry.clear();
    assert!(telemetry.is_empty());
    let snap = telemetry.snapshot_if_changed(seen).unwrap();
    assert!(snap.is_empty());
    assert_eq!(snap.points(), Vec::<(f64, f64)>::new());
}

#[test]
fn test_concurrent_push_and_snapshot() {
    use std::sync::Arc;

    let telemetry = Arc::new(Telemetry::new());
    let writer = {
        let telemetry = telemetry.clone();
        std::thread::spawn(move || {
            for t in 0..2000 {
                telemetry.push_sample(Sample::new(t % 300, t));
            }
        })
    };

    for _ in 0..200 {
        let snap = telemetry.snapshot();
        assert_eq!(snap.times.len(), snap.values.len());
    }
    writer.join().unwrap();
}
