//! Adapter for detectors that report results asynchronously.
//!
//! `predict` hands the frame to the detector and immediately answers with
//! whatever result is in the latest-result cell. That result may belong to an
//! earlier frame; the one-frame lag is accepted in exchange for not waiting on
//! the detector.

use {
    crate::{InferError, LatestResult, Predictor},
    base::Frame,
    serde::Serialize,
    std::{
        sync::Arc,
        thread::{self, JoinHandle},
        time::Instant,
    },
    tokio::sync::mpsc,
};

/// A detector fed frames asynchronously that publishes its latest result.
pub trait StreamingDetector: Send {
    type Snapshot: Send + Sync + 'static;

    /// Hand a frame over without waiting for its result.
    fn submit(&mut self, frame: &Frame) -> Result<(), InferError>;

    /// The most recent result, if any ever arrived.
    fn latest(&self) -> Option<Arc<Self::Snapshot>>;
}

/// Turns a detector snapshot into records for a frame of the given size.
pub trait IntoRecords {
    /// `Default` must be the all-zero record, sent before any result exists.
    type Record: Serialize + Default;

    fn records(&self, width: u32, height: u32) -> Vec<Self::Record>;
}

pub struct StreamingAdapter<D> {
    detector: D,
}

impl<D: StreamingDetector> StreamingAdapter<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }
}

impl<D> Predictor for StreamingAdapter<D>
where
    D: StreamingDetector,
    D::Snapshot: IntoRecords,
{
    type Record = <D::Snapshot as IntoRecords>::Record;

    fn predict(&mut self, frame: &Frame) -> Result<Vec<Self::Record>, InferError> {
        self.detector.submit(frame)?;
        Ok(match self.detector.latest() {
            Some(snapshot) => snapshot.records(frame.width(), frame.height()),
            None => vec![Self::Record::default()],
        })
    }
}

/// A model run synchronously on a frame, stamped with a strictly increasing
/// millisecond timestamp.
pub trait LandmarkModel: Send + 'static {
    type Output: Send + Sync + 'static;

    fn detect(&mut self, frame: &Frame, timestamp_ms: u64) -> Result<Self::Output, InferError>;
}

/// Runs a `LandmarkModel` on its own thread, turning it into a
/// `StreamingDetector`.
///
/// At most one frame waits for the model; frames submitted while one is
/// waiting are dropped, as a live stream would drop them. Each result is
/// published to the latest-result cell from the detector thread.
pub struct ThreadedDetector<T> {
    frames: Option<mpsc::Sender<(u64, Frame)>>,
    latest: LatestResult<T>,
    handle: Option<JoinHandle<()>>,
    epoch: Instant,
    last_timestamp: Option<u64>,
}

impl<T: Send + Sync + 'static> ThreadedDetector<T> {
    pub fn spawn<M: LandmarkModel<Output = T>>(mut model: M) -> Result<Self, InferError> {
        let (frames_tx, mut frames_rx) = mpsc::channel::<(u64, Frame)>(1);
        let latest = LatestResult::new();

        let publish = {
            let latest = latest.clone();
            move |result: T| latest.publish(result)
        };

        let handle = thread::Builder::new()
            .name("detector".to_string())
            .spawn(move || {
                while let Some((timestamp, frame)) = frames_rx.blocking_recv() {
                    let started = Instant::now();
                    match model.detect(&frame, timestamp) {
                        Ok(result) => {
                            log::debug!("detection {} in {:?}", timestamp, started.elapsed());
                            publish(result);
                        }
                        Err(e) => log::warn!("detection {} failed: {}", timestamp, e),
                    }
                }
                log::debug!("detector thread exiting");
            })
            .map_err(|e| InferError::Runtime(format!("failed to spawn detector thread: {e}")))?;

        Ok(Self {
            frames: Some(frames_tx),
            latest,
            handle: Some(handle),
            epoch: Instant::now(),
            last_timestamp: None,
        })
    }

    /// The cell results are published to.
    pub fn results(&self) -> &LatestResult<T> {
        &self.latest
    }

    fn next_timestamp(&mut self) -> u64 {
        let now = self.epoch.elapsed().as_millis() as u64;
        let timestamp = match self.last_timestamp {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}

impl<T: Send + Sync + 'static> StreamingDetector for ThreadedDetector<T> {
    type Snapshot = T;

    fn submit(&mut self, frame: &Frame) -> Result<(), InferError> {
        let timestamp = self.next_timestamp();
        let frames = self
            .frames
            .as_ref()
            .ok_or_else(|| InferError::Runtime("detector stopped".to_string()))?;

        match frames.try_send((timestamp, frame.clone())) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                log::debug!("detector busy, dropping frame {}", timestamp);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                Err(InferError::Runtime("detector thread stopped".to_string()))
            }
        }
    }

    fn latest(&self) -> Option<Arc<T>> {
        self.latest.snapshot()
    }
}

impl<T> Drop for ThreadedDetector<T> {
    fn drop(&mut self) {
        // closing the channel ends the detector thread after its current frame
        self.frames.take();
        self.handle.take();
    }
}
