//! Decoding of YOLO-pose output.

use crate::{InferError, Letterbox};

/// Rows per candidate: 4 box values, 1 score, 17 keypoints of 3 values.
pub const POSE_ROWS: usize = 56;
pub const KEYPOINT_COUNT: usize = 17;
pub const NOSE: usize = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// One person, in source frame pixels. `bbox` is `[x1, y1, x2, y2]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseDetection {
    pub bbox: [f32; 4],
    pub confidence: f32,
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
}

/// Intersection over union of two `[x1, y1, x2, y2]` boxes.
///
/// Returns 0.0 for disjoint or degenerate boxes.
pub fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let area = |r: &[f32; 4]| (r[2] - r[0]).max(0.0) * (r[3] - r[1]).max(0.0);
    let (area_a, area_b) = (area(a), area(b));
    if area_a <= 0.0 || area_b <= 0.0 {
        return 0.0;
    }

    let inter = area(&[a[0].max(b[0]), a[1].max(b[1]), a[2].min(b[2]), a[3].min(b[3])]);
    let union = area_a + area_b - inter;
    if union <= 0.0 {
        return 0.0;
    }
    inter / union
}

/// Decode a `[1, 56, N]` output into detections sorted by confidence, after
/// a confidence filter and greedy NMS.
pub fn decode_poses(
    data: &[f32],
    shape: &[usize],
    letterbox: &Letterbox,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, InferError> {
    if shape.len() != 3 || shape[0] != 1 || shape[1] != POSE_ROWS {
        return Err(InferError::Shape(format!(
            "expected [1, {POSE_ROWS}, N], got {shape:?}"
        )));
    }
    let n = shape[2];
    if data.len() != POSE_ROWS * n {
        return Err(InferError::Shape(format!(
            "{} values for shape {shape:?}",
            data.len()
        )));
    }

    // element [0, row, i] sits at row * n + i
    let at = |row: usize, i: usize| data[row * n + i];

    let mut candidates: Vec<PoseDetection> = (0..n)
        .filter(|&i| at(4, i) >= conf_threshold)
        .map(|i| {
            let (cx, cy) = letterbox.to_source(at(0, i), at(1, i));
            let (w, h) = (at(2, i) / letterbox.scale, at(3, i) / letterbox.scale);
            let keypoints = std::array::from_fn(|k| {
                let row = 5 + k * 3;
                let (x, y) = letterbox.to_source(at(row, i), at(row + 1, i));
                Keypoint {
                    x,
                    y,
                    confidence: at(row + 2, i),
                }
            });
            PoseDetection {
                bbox: [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
                confidence: at(4, i),
                keypoints,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut keep: Vec<PoseDetection> = Vec::new();
    for candidate in candidates {
        if keep
            .iter()
            .all(|kept| iou(&kept.bbox, &candidate.bbox) <= iou_threshold)
        {
            keep.push(candidate);
        }
    }

    Ok(keep)
}
