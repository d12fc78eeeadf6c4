//! Inference adapters behind a uniform `predict(frame) -> records` contract.
//!
//! Streaming detectors (fed asynchronously, read through a latest-result
//! cell) and batch detectors (run to completion per frame) both become a
//! `Predictor`, which `PredictionService` serves over the worker socket.

pub mod batch;
pub mod error;
pub mod head;
pub mod latest;
pub mod letterbox;
pub mod pose;
pub mod predictor;
pub mod record;
pub mod service;
pub mod streaming;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use batch::{
    ANGLE_SCALES, BatchAdapter, BatchDetector, HEAD_POSE_ROW, RawDetections, head_pose_record,
    to_radians,
};
pub use error::InferError;
pub use head::PoseLandmarks;
pub use latest::LatestResult;
pub use letterbox::{Letterbox, PAD_VALUE};
pub use pose::{Keypoint, PoseDetection, decode_poses, iou};
pub use predictor::{Predictor, predict_json};
pub use record::{HeadPoseRecord, HeadRecord, encode_failure, encode_predictions};
pub use service::PredictionService;
pub use streaming::{IntoRecords, LandmarkModel, StreamingAdapter, StreamingDetector, ThreadedDetector};

#[cfg(feature = "onnx")]
pub use onnx::{OnnxHeadPose, OnnxModel, OnnxPoseModel};
