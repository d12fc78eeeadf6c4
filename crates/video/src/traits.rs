use crate::CameraError;

/// A physical (or simulated) camera, driven from its own capture thread.
///
/// All calls block. `capture_frame` returns one interleaved RGB frame at the
/// configured resolution.
pub trait Camera: Send {
    /// Negotiate the capture resolution. Called once before `start`.
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CameraError>;

    fn start(&mut self) -> Result<(), CameraError>;

    fn capture_frame(&mut self) -> Result<Vec<u8>, CameraError>;

    /// Release the device. Must be safe to call more than once.
    fn stop(&mut self);
}

impl<C: Camera + ?Sized> Camera for Box<C> {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        (**self).configure(width, height)
    }

    fn start(&mut self) -> Result<(), CameraError> {
        (**self).start()
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>, CameraError> {
        (**self).capture_frame()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
