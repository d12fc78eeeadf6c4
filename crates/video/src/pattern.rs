use crate::{Camera, CameraError};

/// Synthetic camera producing a moving gradient.
///
/// Pixel `(x, y)` of frame `n` is `[x + n, y, tint]`, truncated to bytes, where
/// `tint` tells the cameras of a rig apart. Useful without hardware.
#[derive(Debug)]
pub struct TestPatternCamera {
    tint: u8,
    width: u32,
    height: u32,
    counter: u32,
    running: bool,
}

impl TestPatternCamera {
    pub fn new(tint: u8) -> Self {
        Self {
            tint,
            width: 0,
            height: 0,
            counter: 0,
            running: false,
        }
    }

    /// Number of frames captured so far.
    pub fn frames_captured(&self) -> u32 {
        self.counter
    }
}

impl Camera for TestPatternCamera {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::Device(format!(
                "unsupported resolution {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn start(&mut self) -> Result<(), CameraError> {
        if self.width == 0 {
            return Err(CameraError::Device("camera not configured".to_string()));
        }
        self.running = true;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>, CameraError> {
        if !self.running {
            return Err(CameraError::Stream("camera not started".to_string()));
        }

        let len = base::Frame::byte_len(self.width, self.height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push(x.wrapping_add(self.counter) as u8);
                pixels.push(y as u8);
                pixels.push(self.tint);
            }
        }
        self.counter = self.counter.wrapping_add(1);
        Ok(pixels)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
