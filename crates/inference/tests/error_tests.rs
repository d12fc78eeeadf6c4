use base::FrameError;
use inference::InferError;
use std::error::Error;

#[test]
fn test_frame_error_is_source() {
    let err = InferError::from(FrameError::SizeOverflow {
        width: u32::MAX,
        height: u32::MAX,
    });
    assert!(err.to_string().starts_with("frame error:"));
    assert!(err.source().is_some());
}

#[test]
fn test_json_error_conversion() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = InferError::from(parse);
    assert!(matches!(err, InferError::Json(_)));
    assert!(err.source().is_none());
}
