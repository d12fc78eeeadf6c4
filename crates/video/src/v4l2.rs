use {
    crate::{Camera, CameraConfig, CameraError, convert::yuyv_to_rgb},
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

/// V4L2 camera delivering YUYV, converted to RGB on capture.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Device,
    stream: Option<MmapStream<'static>>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("device", &"<v4l::Device>")
            .field("streaming", &self.stream.is_some())
            .finish()
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()`.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;
        Ok(Self {
            width: config.width(),
            height: config.height(),
            config,
            device,
            stream: None,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

impl Camera for V4l2Camera {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        let format = Format::new(width, height, FourCC::new(b"YUYV"));
        let actual = Capture::set_format(&self.device, &format)?;

        if actual.fourcc != FourCC::new(b"YUYV") {
            return Err(CameraError::Device(format!(
                "YUYV not supported by {}, got {}",
                self.config.device(),
                actual.fourcc
            )));
        }
        // frames must come out at exactly the negotiated size
        if actual.width != width || actual.height != height {
            return Err(CameraError::Device(format!(
                "{} refused {}x{}, offers {}x{}",
                self.config.device(),
                width,
                height,
                actual.width,
                actual.height
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(self.config.fps());
        Capture::set_params(&self.device, &params)?;

        self.width = width;
        self.height = height;
        Ok(())
    }

    fn start(&mut self) -> Result<(), CameraError> {
        let stream = MmapStream::with_buffers(
            &self.device,
            Type::VideoCapture,
            self.config.buffer_count(),
        )
        .map_err(|e| CameraError::Stream(e.to_string()))?;
        self.stream = Some(stream);
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>, CameraError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| CameraError::Stream("camera not started".to_string()))?;

        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|e| CameraError::Stream(e.to_string()))?;

        yuyv_to_rgb(data, self.width, self.height).ok_or_else(|| {
            CameraError::Stream(format!(
                "short YUYV buffer: {} bytes for {}x{}",
                data.len(),
                self.width,
                self.height
            ))
        })
    }

    fn stop(&mut self) {
        self.stream.take();
    }
}
