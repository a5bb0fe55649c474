use std::time::Duration;

use webshot::application::ports::CaptureError;
use webshot::domain::FailureKind;

#[test]
fn given_network_and_timeout_when_classified_then_transient() {
    assert!(FailureKind::NetworkError.is_transient());
    assert!(FailureKind::Timeout.is_transient());
    assert!(FailureKind::StorageError.is_transient());
}

#[test]
fn given_input_and_render_failures_when_classified_then_permanent() {
    assert!(!FailureKind::InvalidUrl.is_transient());
    assert!(!FailureKind::RenderError.is_transient());
    assert!(!FailureKind::TooLarge.is_transient());
}

#[test]
fn given_capture_errors_when_mapped_then_kinds_match() {
    assert_eq!(
        CaptureError::Timeout(Duration::from_secs(1)).kind(),
        FailureKind::Timeout
    );
    assert_eq!(
        CaptureError::Network("net::ERR_NAME_NOT_RESOLVED".into()).kind(),
        FailureKind::NetworkError
    );
    assert_eq!(
        CaptureError::Render("crash".into()).kind(),
        FailureKind::RenderError
    );
    assert_eq!(
        CaptureError::TooLarge { size: 2, limit: 1 }.kind(),
        FailureKind::TooLarge
    );
}
