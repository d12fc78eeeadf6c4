//! Head position worker.
//!
//! A pose landmark model runs on its own thread in live-stream fashion; every
//! request submits its frame and is answered with the nose position of each
//! person in the most recent result.

use {
    clap::Parser,
    inference::{InferError, PoseLandmarks, PredictionService, StreamingAdapter, ThreadedDetector},
    std::{path::PathBuf, time::Duration},
};

pub const DEFAULT_SOCKET: &str = "/tmp/head.sock";
pub const DEFAULT_MODEL: &str = "models/yolov8n-pose.onnx";

pub type HeadPredictor = StreamingAdapter<ThreadedDetector<PoseLandmarks>>;

#[derive(Parser, Debug)]
#[command(name = "head-detection", about = "Head position worker")]
pub struct Options {
    #[arg(long, default_value = DEFAULT_SOCKET)]
    pub socket: PathBuf,

    /// Pose landmark model.
    #[arg(long, env = "HEAD_MODEL_PATH", default_value = DEFAULT_MODEL)]
    pub model: PathBuf,

    /// Most people reported per frame.
    #[arg(long, default_value_t = 5)]
    pub max_poses: usize,

    #[arg(long, default_value_t = 0.5)]
    pub conf_threshold: f32,

    /// Pause after every reply.
    #[arg(long, default_value_t = 100)]
    pub throttle_ms: u64,

    /// Write logs to date-named files in this directory instead of stdout.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Options {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

#[cfg(feature = "onnx")]
pub fn load_predictor(options: &Options) -> Result<HeadPredictor, InferError> {
    let model = inference::OnnxPoseModel::load(
        &options.model,
        options.max_poses,
        options.conf_threshold,
    )?;
    Ok(StreamingAdapter::new(ThreadedDetector::spawn(model)?))
}

#[cfg(not(feature = "onnx"))]
pub fn load_predictor(options: &Options) -> Result<HeadPredictor, InferError> {
    Err(InferError::ModelLoad(format!(
        "cannot load {}: built without the onnx feature",
        options.model.display()
    )))
}

pub fn service(predictor: HeadPredictor, options: &Options) -> PredictionService<HeadPredictor> {
    PredictionService::new(predictor).with_throttle(options.throttle())
}
