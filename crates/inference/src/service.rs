use {
    crate::{Predictor, predict_json},
    com::{ComError, Cycle, Session, framing},
    std::{
        sync::{Arc, Mutex},
        time::{Duration, Instant},
    },
    tokio::io::{AsyncRead, AsyncWrite},
};

/// Inference worker session.
///
/// Each cycle reads `width, height, len` and `len` pixel bytes, runs the
/// predictor off the async thread and replies with one length-prefixed JSON
/// document. Per-request failures are answered in-band; only transport
/// errors end the connection.
pub struct PredictionService<P> {
    predictor: Arc<Mutex<P>>,
    throttle: Duration,
}

impl<P: Predictor + 'static> PredictionService<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor: Arc::new(Mutex::new(predictor)),
            throttle: Duration::ZERO,
        }
    }

    /// Pause after every reply.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    async fn run(&self, pixels: Vec<u8>, width: u32, height: u32) -> String {
        let predictor = Arc::clone(&self.predictor);
        let task = tokio::task::spawn_blocking(move || {
            let mut predictor = predictor.lock().unwrap_or_else(|e| e.into_inner());
            predict_json(&mut *predictor, pixels, width, height)
        });

        match task.await {
            Ok(json) => json,
            Err(e) => {
                log::error!("inference task failed: {}", e);
                crate::encode_failure("inference task failed")
            }
        }
    }
}

impl<P: Predictor + 'static> Session for PredictionService<P> {
    type Error = ComError;

    async fn cycle<S>(&mut self, stream: &mut S) -> Result<Cycle, ComError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (width, height) = match framing::read_dimensions(stream).await {
            Ok(dimensions) => dimensions,
            Err(ComError::ConnectionClosed) => return Ok(Cycle::Closed),
            Err(e) => return Err(e),
        };
        let len = framing::read_u32(stream).await?;

        let started = Instant::now();
        let pixels = framing::read_payload(stream, len).await?;
        let received = started.elapsed();

        let reply = self.run(pixels, width, height).await;
        let inferred = started.elapsed();

        framing::write_frame(stream, reply.as_bytes()).await?;
        log::debug!(
            "{}x{}: receive {:?}, inference {:?}, total {:?}",
            width,
            height,
            received,
            inferred - received,
            started.elapsed()
        );

        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }
        Ok(Cycle::Continue)
    }
}
