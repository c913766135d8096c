use telemetry_viewer::protocol::{FrameError, FrameField};
use telemetry_viewer::resilience::{ErrorPolicy, FrameGuard, Recovery};

fn bad_terminator() -> FrameError {
    FrameError::BadTerminator {
        raw: b"end_msg?".to_vec(),
    }
}

fn bad_number() -> FrameError {
    FrameError::InvalidNumber {
        field: FrameField::Timestamp,
        raw: b"12ab5678".to_vec(),
    }
}

#[test]
fn test_error_policy_default_skips() {
    match ErrorPolicy::default() {
        ErrorPolicy::SkipFrame {
            max_consecutive_errors,
        } => assert_eq!(max_consecutive_errors, 16),
        _ => panic!("Wrong variant"),
    }
}

#[test]
fn test_guard_picks_recovery() {
    let mut guard = FrameGuard::new(ErrorPolicy::skip_frame());
    assert_eq!(guard.handle(bad_terminator()).unwrap(), Recovery::Realign);
    assert_eq!(guard.handle(bad_number()).unwrap(), Recovery::DropFrame);
    assert_eq!(guard.consecutive_errors(), 2);

    guard.record_success();
    assert_eq!(guard.consecutive_errors(), 0);
}

#[test]
fn test_guard_never_absorbs_transport_errors() {
    let mut guard = FrameGuard::new(ErrorPolicy::skip_frame());
    assert!(matches!(
        guard.handle(FrameError::Disconnected),
        Err(FrameError::Disconnected)
    ));
    assert!(matches!(
        guard.handle(FrameError::ResyncFailed { scanned: 4096 }),
        Err(FrameError::ResyncFailed { .. })
    ));
}

#[test]
fn test_policy_names() {
    assert_eq!(ErrorPolicy::Stop.name(), "stop");
    assert_eq!(ErrorPolicy::skip_frame().name(), "skip_frame");
}
