use std::time::Duration;

/// Wait bound for one capture request, in milliseconds.
pub const DEFAULT_CAPTURE_TIMEOUT_MS: u64 = 2000;

/// Configuration for one camera.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    index: u32,
    device: Option<String>,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            device: None,
            width: 1296,
            height: 972,
            fps: 30,
            buffer_count: 4,
        }
    }
}

impl CameraConfig {
    /// Set the camera index.
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Set an explicit device path, overriding the one derived from the index.
    pub fn with_device(mut self, device: String) -> Self {
        self.device = Some(device);
        self
    }

    /// Set the capture width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the capture height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the frames per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the buffer count for the capture stream.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Device path: the explicit one, or `/dev/video<index>`.
    pub fn device(&self) -> String {
        match &self.device {
            Some(device) => device.clone(),
            None => format!("/dev/video{}", self.index),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}

/// Configuration for a two-camera capture rig.
#[derive(Clone, Debug)]
pub struct RigConfig {
    cameras: [CameraConfig; 2],
    capture_timeout: Duration,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::new(
            CameraConfig::default().with_index(0),
            CameraConfig::default().with_index(1),
        )
    }
}

impl RigConfig {
    pub fn new(first: CameraConfig, second: CameraConfig) -> Self {
        Self {
            cameras: [first, second],
            capture_timeout: Duration::from_millis(DEFAULT_CAPTURE_TIMEOUT_MS),
        }
    }

    /// Set how long a capture request waits for both cameras.
    pub fn with_capture_timeout(mut self, timeout: Duration) -> Self {
        self.capture_timeout = timeout;
        self
    }

    pub fn first(&self) -> &CameraConfig {
        &self.cameras[0]
    }

    pub fn second(&self) -> &CameraConfig {
        &self.cameras[1]
    }

    pub fn cameras(&self) -> &[CameraConfig; 2] {
        &self.cameras
    }

    pub fn capture_timeout(&self) -> Duration {
        self.capture_timeout
    }

    /// `(width, height)` of camera 1 and camera 2.
    pub fn dimensions(&self) -> [(u32, u32); 2] {
        [
            (self.cameras[0].width(), self.cameras[0].height()),
            (self.cameras[1].width(), self.cameras[1].height()),
        ]
    }
}
