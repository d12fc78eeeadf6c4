//! Two-camera capture synchronization.
//!
//! Each camera is owned by its own OS thread. The thread blocks on a request
//! channel; `Capture(n)` makes it grab one frame and push `(n, frame)` to its
//! result channel, `Stop` makes it release the camera and exit. The dispatcher
//! (`CaptureRig::capture_pair`) triggers both cameras, then waits for both
//! results under one deadline, so a pair is only ever handed out complete.

use {
    crate::{Camera, CameraConfig, CameraError, CaptureError, RigConfig},
    base::Frame,
    std::{
        thread::{self, JoinHandle},
        time::{Duration, Instant},
    },
    tokio::{
        sync::{mpsc, oneshot},
        time,
    },
};

enum Signal {
    Capture(u64),
    Stop,
}

type CaptureResult = (u64, Result<Frame, CameraError>);

/// Handle to one camera's capture thread. `camera` is 1 or 2.
struct CaptureThread {
    camera: usize,
    requests: mpsc::UnboundedSender<Signal>,
    results: mpsc::UnboundedReceiver<CaptureResult>,
    handle: Option<JoinHandle<()>>,
}

impl CaptureThread {
    async fn spawn<C: Camera + 'static>(
        camera: usize,
        device: C,
        config: CameraConfig,
    ) -> Result<Self, CaptureError> {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        // the camera is configured and started on its own thread, so report
        // the outcome back before accepting any requests
        let (init_tx, init_rx) = oneshot::channel();

        let handle = thread::Builder::new()
            .name(format!("camera-{camera}"))
            .spawn(move || capture_loop(camera, device, config, request_rx, result_tx, init_tx))
            .map_err(|e| CaptureError::Camera {
                camera,
                source: e.into(),
            })?;

        match init_rx.await {
            Ok(Ok(())) => Ok(Self {
                camera,
                requests: request_tx,
                results: result_rx,
                handle: Some(handle),
            }),
            Ok(Err(source)) => Err(CaptureError::Camera { camera, source }),
            Err(_) => Err(CaptureError::Stopped { camera }),
        }
    }

    fn request(&self, sequence: u64) -> Result<(), CaptureError> {
        self.requests
            .send(Signal::Capture(sequence))
            .map_err(|_| CaptureError::Stopped {
                camera: self.camera,
            })
    }

    /// Wait for the result of request `sequence`, dropping leftovers of
    /// earlier requests that missed their deadline.
    async fn receive(
        &mut self,
        sequence: u64,
        deadline: time::Instant,
        bound: Duration,
    ) -> Result<Frame, CaptureError> {
        loop {
            match time::timeout_at(deadline, self.results.recv()).await {
                Err(_) => {
                    return Err(CaptureError::Timeout {
                        camera: self.camera,
                        bound,
                    });
                }
                Ok(None) => {
                    return Err(CaptureError::Stopped {
                        camera: self.camera,
                    });
                }
                Ok(Some((received, _))) if received < sequence => {
                    log::debug!(
                        "camera {}: discarding stale frame {} (waiting for {})",
                        self.camera,
                        received,
                        sequence
                    );
                }
                Ok(Some((_, result))) => {
                    return result.map_err(|source| CaptureError::Camera {
                        camera: self.camera,
                        source,
                    });
                }
            }
        }
    }

    fn stop(&self) {
        // the thread may already be gone
        let _ = self.requests.send(Signal::Stop);
    }
}

impl Drop for CaptureThread {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop<C: Camera>(
    camera: usize,
    mut device: C,
    config: CameraConfig,
    mut requests: mpsc::UnboundedReceiver<Signal>,
    results: mpsc::UnboundedSender<CaptureResult>,
    init: oneshot::Sender<Result<(), CameraError>>,
) {
    let (width, height) = (config.width(), config.height());

    let opened = device
        .configure(width, height)
        .and_then(|()| device.start());
    if let Err(e) = opened {
        device.stop();
        let _ = init.send(Err(e));
        return;
    }
    if init.send(Ok(())).is_err() {
        device.stop();
        return;
    }
    log::info!(
        "camera {}: capturing {}x{} from {}",
        camera,
        width,
        height,
        config.device()
    );

    while let Some(signal) = requests.blocking_recv() {
        let Signal::Capture(sequence) = signal else {
            break;
        };

        let started = Instant::now();
        let frame = device
            .capture_frame()
            .and_then(|pixels| Ok(Frame::new(width, height, pixels)?));
        match &frame {
            Ok(_) => log::debug!(
                "camera {}: frame {} in {:?}",
                camera,
                sequence,
                started.elapsed()
            ),
            Err(e) => log::warn!("camera {}: frame {} failed: {}", camera, sequence, e),
        }

        if results.send((sequence, frame)).is_err() {
            break;
        }
    }

    device.stop();
    log::info!("camera {}: stopped", camera);
}

/// Two cameras behind one synchronized capture call.
pub struct CaptureRig {
    threads: [CaptureThread; 2],
    dimensions: [(u32, u32); 2],
    timeout: Duration,
    sequence: u64,
}

impl CaptureRig {
    /// Spawn one capture thread per camera and start both cameras at the
    /// configured resolutions.
    pub async fn start<C: Camera + 'static>(
        config: &RigConfig,
        cameras: [C; 2],
    ) -> Result<Self, CaptureError> {
        let [first, second] = cameras;
        let first = CaptureThread::spawn(1, first, config.first().clone()).await?;
        let second = CaptureThread::spawn(2, second, config.second().clone()).await?;

        Ok(Self {
            threads: [first, second],
            dimensions: config.dimensions(),
            timeout: config.capture_timeout(),
            sequence: 0,
        })
    }

    /// `(width, height)` of camera 1 and camera 2.
    pub fn dimensions(&self) -> [(u32, u32); 2] {
        self.dimensions
    }

    pub fn capture_timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of capture requests issued so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Trigger both cameras and wait for both frames.
    ///
    /// Fails with `CaptureError::Timeout` if either frame is not in within the
    /// capture timeout of the trigger. Frames belonging to an earlier, failed
    /// request are never returned.
    pub async fn capture_pair(&mut self) -> Result<(Frame, Frame), CaptureError> {
        self.sequence += 1;
        let sequence = self.sequence;
        let started = Instant::now();

        for thread in &self.threads {
            thread.request(sequence)?;
        }

        let deadline = time::Instant::now() + self.timeout;
        let [first, second] = &mut self.threads;
        let first = first.receive(sequence, deadline, self.timeout).await?;
        let second = second.receive(sequence, deadline, self.timeout).await?;

        log::debug!("pair {} captured in {:?}", sequence, started.elapsed());
        Ok((first, second))
    }

    /// Send the stop signal to both capture threads.
    ///
    /// A thread in the middle of a capture finishes it first.
    pub fn stop(&self) {
        for thread in &self.threads {
            thread.stop();
        }
    }

    /// Stop both capture threads and wait for them to release their cameras.
    ///
    /// A thread finishes its current capture before it sees the stop signal,
    /// so this waits for an in-flight capture too. A camera that never
    /// returns from `capture_frame` blocks this forever; the next rig cannot
    /// open the same device before it is released anyway.
    pub async fn shutdown(mut self) {
        self.stop();
        let handles: Vec<_> = self
            .threads
            .iter_mut()
            .filter_map(|thread| thread.handle.take())
            .collect();

        let joined = tokio::task::spawn_blocking(move || {
            for handle in handles {
                if handle.join().is_err() {
                    log::error!("capture thread panicked");
                }
            }
        })
        .await;
        if let Err(e) = joined {
            log::error!("failed to join capture threads: {}", e);
        }
    }
}

impl Drop for CaptureRig {
    fn drop(&mut self) {
        self.stop();
    }
}
