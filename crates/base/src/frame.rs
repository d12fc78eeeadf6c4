use std::fmt;

/// Bytes per pixel of an interleaved RGB frame.
pub const RGB_CHANNELS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    SizeOverflow { width: u32, height: u32 },
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeOverflow { width, height } => {
                write!(f, "frame size overflow: {width}x{height}")
            }
            FrameError::SizeMismatch {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "frame size mismatch: {width}x{height} RGB needs {expected} bytes, got {actual}"
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// One raw RGB image: row-major, interleaved, no header beyond its dimensions.
///
/// A `Frame` can only be built with `pixels.len() == width * height * 3`.
#[derive(Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

impl Frame {
    /// Number of bytes an RGB frame of the given size occupies.
    pub fn byte_len(width: u32, height: u32) -> Result<usize, FrameError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(RGB_CHANNELS))
            .ok_or(FrameError::SizeOverflow { width, height })
    }

    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = Self::byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn black(width: u32, height: u32) -> Result<Self, FrameError> {
        let len = Self::byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGB triple at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * RGB_CHANNELS;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}
