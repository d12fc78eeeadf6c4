//! Coordinator-side clients for the worker sockets.

use {
    crate::{ComError, framing},
    base::Frame,
    std::path::Path,
    tokio::{
        io::{AsyncRead, AsyncWrite, AsyncWriteExt},
        net::UnixStream,
    },
};

/// Trigger codes of one capture cycle.
pub const TRIGGER_FIRST: u32 = 1;
pub const TRIGGER_SECOND: u32 = 2;

/// Client of the camera worker.
///
/// On connect it sends its identity and reads the four configured dimensions
/// (`width1, height1, width2, height2`). Each `capture_pair` then runs one
/// trigger 1 / trigger 2 cycle.
pub struct CameraClient<S = UnixStream> {
    stream: S,
    dimensions: [(u32, u32); 2],
    echo_dimensions: bool,
}

impl CameraClient<UnixStream> {
    pub async fn connect(
        path: impl AsRef<Path>,
        identity: &str,
        echo_dimensions: bool,
    ) -> Result<Self, ComError> {
        let stream = UnixStream::connect(path).await?;
        Self::handshake(stream, identity, echo_dimensions).await
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> CameraClient<S> {
    /// Run the identity/dimensions handshake over an already connected stream.
    pub async fn handshake(
        mut stream: S,
        identity: &str,
        echo_dimensions: bool,
    ) -> Result<Self, ComError> {
        stream.write_all(identity.as_bytes()).await?;
        stream.flush().await?;

        let first = framing::read_dimensions(&mut stream).await?;
        let second = framing::read_dimensions(&mut stream).await?;
        log::debug!(
            "camera worker reports {}x{} and {}x{}",
            first.0,
            first.1,
            second.0,
            second.1
        );

        Ok(Self {
            stream,
            dimensions: [first, second],
            echo_dimensions,
        })
    }

    /// Configured `(width, height)` of camera 1 and camera 2.
    pub fn dimensions(&self) -> [(u32, u32); 2] {
        self.dimensions
    }

    /// Request one synchronized pair: camera 1 first, then camera 2.
    pub async fn capture_pair(&mut self) -> Result<(Frame, Frame), ComError> {
        let first = self.request(TRIGGER_FIRST, 0).await?;
        let second = self.request(TRIGGER_SECOND, 1).await?;
        Ok((first, second))
    }

    async fn request(&mut self, trigger: u32, camera: usize) -> Result<Frame, ComError> {
        framing::write_u32(&mut self.stream, trigger).await?;
        self.stream.flush().await?;

        let (width, height) = if self.echo_dimensions {
            framing::read_dimensions(&mut self.stream).await?
        } else {
            self.dimensions[camera]
        };
        let pixels = framing::read_frame(&mut self.stream).await?;
        Ok(Frame::new(width, height, pixels)?)
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

/// Client of an inference worker.
///
/// Each `predict` sends `width, height, len, bytes` and returns the JSON text
/// of the reply.
pub struct InferenceClient<S = UnixStream> {
    stream: S,
}

impl InferenceClient<UnixStream> {
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, ComError> {
        let stream = UnixStream::connect(path).await?;
        Ok(Self::new(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> InferenceClient<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub async fn predict(&mut self, frame: &Frame) -> Result<String, ComError> {
        self.predict_raw(frame.width(), frame.height(), frame.pixels())
            .await
    }

    /// Send arbitrary dimensions and payload, without checking they agree.
    pub async fn predict_raw(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<String, ComError> {
        framing::write_dimensions(&mut self.stream, width, height).await?;
        framing::write_frame(&mut self.stream, pixels).await?;

        let reply = framing::read_frame(&mut self.stream).await?;
        String::from_utf8(reply)
            .map_err(|e| ComError::Malformed(format!("reply is not utf-8: {e}")))
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}
