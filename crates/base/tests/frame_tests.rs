use base::{Frame, FrameError};

#[test]
fn test_frame_accepts_exact_rgb_length() {
    let frame = Frame::new(4, 2, vec![7u8; 4 * 2 * 3]).expect("valid frame");
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.pixels().len(), 24);
}

#[test]
fn test_frame_rejects_short_buffer() {
    let result = Frame::new(4, 2, vec![0u8; 23]);
    assert_eq!(
        result,
        Err(FrameError::SizeMismatch {
            width: 4,
            height: 2,
            expected: 24,
            actual: 23,
        })
    );
}

#[test]
fn test_frame_rejects_long_buffer() {
    let result = Frame::new(1, 1, vec![0u8; 4]);
    assert!(matches!(
        result,
        Err(FrameError::SizeMismatch { expected: 3, actual: 4, .. })
    ));
}

#[test]
fn test_zero_sized_frame_is_empty() {
    let frame = Frame::new(0, 10, Vec::new()).expect("empty frame");
    assert!(frame.pixels().is_empty());
}

#[test]
fn test_black_frame_dimensions() {
    let frame = Frame::black(1296, 972).unwrap();
    assert_eq!(frame.pixels().len(), 1296 * 972 * 3);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
}

#[test]
fn test_pixel_lookup() {
    let mut pixels = vec![0u8; 2 * 2 * 3];
    // (1, 1) is the last pixel
    pixels[9..12].copy_from_slice(&[10, 20, 30]);
    let frame = Frame::new(2, 2, pixels).unwrap();

    assert_eq!(frame.pixel(1, 1), Some([10, 20, 30]));
    assert_eq!(frame.pixel(2, 0), None);
}

#[test]
fn test_error_display() {
    let err = FrameError::SizeMismatch {
        width: 2,
        height: 2,
        expected: 12,
        actual: 5,
    };
    let display = err.to_string();
    assert!(display.contains("2x2"));
    assert!(display.contains("12"));
    assert!(display.contains("5"));
}
