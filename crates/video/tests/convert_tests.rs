use video::convert::yuyv_to_rgb;

#[test]
fn test_neutral_chroma_gives_gray_levels() {
    // Y0=255 Y1=0 with neutral U/V: one white, one black pixel
    let rgb = yuyv_to_rgb(&[255, 128, 0, 128], 2, 1).expect("valid input");
    assert_eq!(rgb, vec![255, 255, 255, 0, 0, 0]);
}

#[test]
fn test_red_chroma_raises_red_channel() {
    // high V pushes red up and green down
    let rgb = yuyv_to_rgb(&[100, 128, 100, 200], 2, 1).expect("valid input");
    let (r, g, b) = (rgb[0], rgb[1], rgb[2]);
    assert!(r > 100);
    assert!(g < 100);
    assert_eq!(b, 100);
    assert_eq!(&rgb[0..3], &rgb[3..6]);
}

#[test]
fn test_output_is_three_bytes_per_pixel() {
    let yuyv = vec![128u8; 4 * 3 * 2];
    let rgb = yuyv_to_rgb(&yuyv, 4, 3).expect("valid input");
    assert_eq!(rgb.len(), 4 * 3 * 3);
    assert!(base::Frame::new(4, 3, rgb).is_ok());
}

#[test]
fn test_short_input_returns_none() {
    assert!(yuyv_to_rgb(&[128; 4], 2, 2).is_none());
    assert!(yuyv_to_rgb(&[], 2, 1).is_none());
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let rgb = yuyv_to_rgb(&[128, 128, 128, 128, 1, 2, 3, 4], 2, 1).expect("valid input");
    assert_eq!(rgb.len(), 6);
}
