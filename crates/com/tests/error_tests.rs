use {com::ComError, std::io, std::path::PathBuf};

#[test]
fn test_from_io_error() {
    let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe broken");
    let com_err: ComError = io_err.into();
    match com_err {
        ComError::Io(_) => {}
        _ => panic!("Expected ComError::Io variant"),
    }
}

#[test]
fn test_from_frame_error_is_malformed() {
    let frame_err = base::Frame::new(2, 2, vec![0; 5]).unwrap_err();
    let com_err: ComError = frame_err.into();
    match com_err {
        ComError::Malformed(msg) => assert!(msg.contains("12")),
        other => panic!("Expected Malformed, got {:?}", other),
    }
}

#[test]
fn test_display_variants() {
    let err = ComError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
    assert!(err.to_string().contains("io error"));

    assert!(ComError::ConnectionClosed.to_string().contains("connection closed"));

    let err = ComError::IncompleteRead {
        expected: 8,
        received: 3,
    };
    let display = err.to_string();
    assert!(display.contains('8'));
    assert!(display.contains('3'));

    assert!(ComError::MessageTooLarge(99).to_string().contains("99"));

    let err = ComError::Bind {
        path: PathBuf::from("/tmp/x.sock"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("/tmp/x.sock"));
}

#[test]
fn test_source_chains_io() {
    use std::error::Error;

    let err = ComError::Bind {
        path: PathBuf::from("/tmp/x.sock"),
        source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
    };
    assert!(err.source().is_some());
    assert!(ComError::ConnectionClosed.source().is_none());
}

#[test]
fn test_is_disconnect() {
    assert!(ComError::ConnectionClosed.is_disconnect());
    assert!(
        ComError::IncompleteRead {
            expected: 4,
            received: 1
        }
        .is_disconnect()
    );
    assert!(ComError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "x")).is_disconnect());
    assert!(ComError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "x")).is_disconnect());

    assert!(!ComError::MessageTooLarge(1).is_disconnect());
    assert!(!ComError::Malformed("bad".into()).is_disconnect());
    assert!(!ComError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "x")).is_disconnect());
}
