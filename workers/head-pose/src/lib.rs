//! Head pose worker.
//!
//! Every request runs the head pose model to completion and is answered with
//! one box and orientation per detected head.

use {
    clap::Parser,
    inference::{BatchAdapter, BatchDetector, InferError, PredictionService},
    std::path::PathBuf,
};

pub const DEFAULT_SOCKET: &str = "/tmp/hpe.sock";
pub const DEFAULT_MODEL: &str = "models/directmhp.onnx";

pub type HeadPosePredictor = BatchAdapter<Box<dyn BatchDetector>>;

#[derive(Parser, Debug)]
#[command(name = "head-pose", about = "Head pose worker")]
pub struct Options {
    #[arg(long, default_value = DEFAULT_SOCKET)]
    pub socket: PathBuf,

    /// Head pose model.
    #[arg(long, env = "HPE_MODEL_PATH", default_value = DEFAULT_MODEL)]
    pub model: PathBuf,

    /// Longest side of the model input.
    #[arg(long, default_value_t = 320)]
    pub img_size: usize,

    /// Model stride; the padded input is a multiple of it.
    #[arg(long, default_value_t = 32)]
    pub stride: usize,

    /// Write logs to date-named files in this directory instead of stdout.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[cfg(feature = "onnx")]
pub fn load_detector(options: &Options) -> Result<Box<dyn BatchDetector>, InferError> {
    let model = inference::OnnxHeadPose::load(&options.model, options.img_size, options.stride)?;
    Ok(Box::new(model))
}

#[cfg(not(feature = "onnx"))]
pub fn load_detector(options: &Options) -> Result<Box<dyn BatchDetector>, InferError> {
    Err(InferError::ModelLoad(format!(
        "cannot load {}: built without the onnx feature",
        options.model.display()
    )))
}

pub fn service(detector: Box<dyn BatchDetector>) -> PredictionService<HeadPosePredictor> {
    PredictionService::new(BatchAdapter::new(detector))
}
