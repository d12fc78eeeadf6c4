//! Head position from pose landmarks.

use crate::{HeadRecord, IntoRecords, PoseDetection, pose::NOSE};

/// Poses found in one frame.
///
/// Nose positions are normalized to `[0, 1]` of the frame they were detected
/// in, so a snapshot can be scaled to whatever request reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseLandmarks {
    pub timestamp_ms: u64,
    pub noses: Vec<(f32, f32)>,
}

impl PoseLandmarks {
    /// Keep the nose of up to `max_poses` detections from a
    /// `width` x `height` frame.
    pub fn from_detections(
        detections: &[PoseDetection],
        width: u32,
        height: u32,
        max_poses: usize,
        timestamp_ms: u64,
    ) -> Self {
        let noses = detections
            .iter()
            .take(max_poses)
            .map(|pose| {
                let nose = pose.keypoints[NOSE];
                (nose.x / width as f32, nose.y / height as f32)
            })
            .collect();

        Self {
            timestamp_ms,
            noses,
        }
    }
}

impl IntoRecords for PoseLandmarks {
    type Record = HeadRecord;

    fn records(&self, width: u32, height: u32) -> Vec<HeadRecord> {
        self.noses
            .iter()
            .map(|&(x, y)| HeadRecord {
                nose_x: x * width as f32,
                nose_y: y * height as f32,
            })
            .collect()
    }
}
