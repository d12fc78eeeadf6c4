use std::time::Duration;
use video::{CameraConfig, DEFAULT_CAPTURE_TIMEOUT_MS, RigConfig};

#[test]
fn test_camera_config_defaults() {
    let config = CameraConfig::default();

    assert_eq!(config.index(), 0);
    assert_eq!(config.device(), "/dev/video0");
    assert_eq!(config.width(), 1296);
    assert_eq!(config.height(), 972);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_device_follows_index_unless_set() {
    let config = CameraConfig::default().with_index(2);
    assert_eq!(config.device(), "/dev/video2");

    let config = config.with_device("/dev/cam-left".to_string());
    assert_eq!(config.device(), "/dev/cam-left");
    assert_eq!(config.index(), 2);
}

#[test]
fn test_camera_config_builder() {
    let config = CameraConfig::default()
        .with_width(640)
        .with_height(480)
        .with_fps(15)
        .with_buffer_count(2);

    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);
}

#[test]
fn test_rig_config_defaults() {
    let rig = RigConfig::default();

    assert_eq!(rig.first().index(), 0);
    assert_eq!(rig.second().index(), 1);
    assert_eq!(rig.dimensions(), [(1296, 972), (1296, 972)]);
    assert_eq!(
        rig.capture_timeout(),
        Duration::from_millis(DEFAULT_CAPTURE_TIMEOUT_MS)
    );
}

#[test]
fn test_rig_config_mixed_resolutions() {
    let rig = RigConfig::new(
        CameraConfig::default().with_width(640).with_height(480),
        CameraConfig::default().with_index(1).with_width(320).with_height(240),
    )
    .with_capture_timeout(Duration::from_millis(250));

    assert_eq!(rig.dimensions(), [(640, 480), (320, 240)]);
    assert_eq!(rig.cameras()[1].index(), 1);
    assert_eq!(rig.capture_timeout(), Duration::from_millis(250));
}
