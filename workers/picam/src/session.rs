use {
    crate::{Cameras, PicamError},
    base::Frame,
    com::{ComError, Cycle, Session, TRIGGER_FIRST, TRIGGER_SECOND, framing},
    tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    video::{CameraError, CaptureRig, RigConfig},
};

/// Camera worker protocol for one coordinator connection.
///
/// On connect the client sends an identity string and receives
/// `width1, height1, width2, height2`. Then every trigger `1` captures a
/// matched pair and returns camera 1's frame; the following trigger `2`
/// returns camera 2's frame of the same pair.
///
/// The capture rig lives exactly as long as the connection.
pub struct PicamSession<F> {
    config: RigConfig,
    open_cameras: F,
    echo_dimensions: bool,
    rig: Option<CaptureRig>,
}

impl<F> PicamSession<F>
where
    F: FnMut(&RigConfig) -> Result<Cameras, CameraError>,
{
    pub fn new(config: RigConfig, open_cameras: F) -> Self {
        Self {
            config,
            open_cameras,
            echo_dimensions: false,
            rig: None,
        }
    }

    /// Precede every frame with its `width, height`.
    pub fn with_echo_dimensions(mut self, echo: bool) -> Self {
        self.echo_dimensions = echo;
        self
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Whether a client currently owns the cameras.
    pub fn is_capturing(&self) -> bool {
        self.rig.is_some()
    }
}

async fn read_trigger<S>(stream: &mut S) -> Result<Option<u32>, ComError>
where
    S: AsyncRead + Unpin,
{
    match framing::read_u32(stream).await {
        Ok(trigger) => Ok(Some(trigger)),
        Err(ComError::ConnectionClosed) => Ok(None),
        Err(e) => Err(e),
    }
}

async fn send_frame<S>(stream: &mut S, frame: &Frame, echo_dimensions: bool) -> Result<(), ComError>
where
    S: AsyncWrite + Unpin,
{
    if echo_dimensions {
        framing::write_dimensions(stream, frame.width(), frame.height()).await?;
    }
    framing::write_frame(stream, frame.pixels()).await
}

impl<F> Session for PicamSession<F>
where
    F: FnMut(&RigConfig) -> Result<Cameras, CameraError>,
{
    type Error = PicamError;

    async fn open<S>(&mut self, stream: &mut S) -> Result<Cycle, PicamError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let identity = match framing::read_identity(stream).await {
            Ok(identity) => identity,
            Err(ComError::ConnectionClosed) => {
                log::info!("client left before identifying");
                return Ok(Cycle::Closed);
            }
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "client identified as \"{}\"",
            String::from_utf8_lossy(&identity).trim()
        );

        let cameras = (self.open_cameras)(&self.config)?;
        let rig = CaptureRig::start(&self.config, cameras).await?;
        let dimensions = rig.dimensions();
        self.rig = Some(rig);

        for (width, height) in dimensions {
            framing::write_dimensions(stream, width, height).await?;
        }
        stream.flush().await?;
        log::info!(
            "sent dimensions {}x{} and {}x{}",
            dimensions[0].0,
            dimensions[0].1,
            dimensions[1].0,
            dimensions[1].1
        );
        Ok(Cycle::Continue)
    }

    async fn cycle<S>(&mut self, stream: &mut S) -> Result<Cycle, PicamError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let Some(rig) = self.rig.as_mut() else {
            return Err(ComError::Malformed("no capture rig for this connection".to_string()).into());
        };

        let Some(trigger) = read_trigger(stream).await? else {
            return Ok(Cycle::Closed);
        };
        if trigger != TRIGGER_FIRST {
            log::warn!("ignoring trigger {} while waiting for {}", trigger, TRIGGER_FIRST);
            return Ok(Cycle::Continue);
        }

        let (first, second) = rig.capture_pair().await?;
        send_frame(stream, &first, self.echo_dimensions).await?;

        let Some(trigger) = read_trigger(stream).await? else {
            return Ok(Cycle::Closed);
        };
        if trigger != TRIGGER_SECOND {
            log::warn!(
                "expected trigger {}, got {}; dropping camera 2 frame",
                TRIGGER_SECOND,
                trigger
            );
            return Ok(Cycle::Continue);
        }

        send_frame(stream, &second, self.echo_dimensions).await?;
        Ok(Cycle::Continue)
    }

    async fn close(&mut self) {
        if let Some(rig) = self.rig.take() {
            rig.shutdown().await;
            log::info!("cameras released");
        }
    }
}
