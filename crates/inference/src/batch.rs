//! Adapter for detectors that return full results synchronously.

use {
    crate::{HeadPoseRecord, InferError, Letterbox, Predictor},
    base::Frame,
    std::f32::consts::PI,
};

/// Values per raw detection: `x1, y1, x2, y2, conf, class, pitch, yaw, roll`.
pub const HEAD_POSE_ROW: usize = 9;

/// Scale of the pitch, yaw and roll channels, which the model emits in `[0, 1]`.
pub const ANGLE_SCALES: [f32; 3] = [PI, 2.0 * PI, PI];

/// Raw model rows, in the coordinates of the letterboxed model input.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDetections {
    pub letterbox: Letterbox,
    pub rows: Vec<[f32; HEAD_POSE_ROW]>,
}

/// A detector that runs to completion on one frame.
pub trait BatchDetector: Send {
    fn infer(&mut self, frame: &Frame) -> Result<RawDetections, InferError>;
}

impl<D: BatchDetector + ?Sized> BatchDetector for Box<D> {
    fn infer(&mut self, frame: &Frame) -> Result<RawDetections, InferError> {
        (**self).infer(frame)
    }
}

/// `angle = (raw - 0.5) * scale`
pub fn to_radians(raw: f32, scale: f32) -> f32 {
    (raw - 0.5) * scale
}

/// Map one raw row into a record for a `width` x `height` frame: undo the
/// letterbox, clip the box to the frame and convert angles to radians.
pub fn head_pose_record(
    row: &[f32; HEAD_POSE_ROW],
    letterbox: &Letterbox,
    width: u32,
    height: u32,
) -> HeadPoseRecord {
    let (w, h) = (width as f32, height as f32);
    let (x1, y1) = letterbox.to_source(row[0], row[1]);
    let (x2, y2) = letterbox.to_source(row[2], row[3]);

    HeadPoseRecord {
        x1: x1.clamp(0.0, w),
        y1: y1.clamp(0.0, h),
        x2: x2.clamp(0.0, w),
        y2: y2.clamp(0.0, h),
        conf: row[4],
        class: row[5],
        pitch: to_radians(row[6], ANGLE_SCALES[0]),
        yaw: to_radians(row[7], ANGLE_SCALES[1]),
        roll: to_radians(row[8], ANGLE_SCALES[2]),
    }
}

pub struct BatchAdapter<D> {
    detector: D,
}

impl<D: BatchDetector> BatchAdapter<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }
}

impl<D: BatchDetector> Predictor for BatchAdapter<D> {
    type Record = HeadPoseRecord;

    fn predict(&mut self, frame: &Frame) -> Result<Vec<HeadPoseRecord>, InferError> {
        let raw = self.detector.infer(frame)?;
        Ok(raw
            .rows
            .iter()
            .map(|row| head_pose_record(row, &raw.letterbox, frame.width(), frame.height()))
            .collect())
    }
}
