//! ONNX Runtime detectors.

use {
    crate::{
        BatchDetector, HEAD_POSE_ROW, InferError, LandmarkModel, Letterbox, PoseLandmarks,
        RawDetections, decode_poses,
    },
    base::Frame,
    ndarray::Array4,
    ort::{inputs, session::Session, value::TensorRef},
    std::path::Path,
};

/// Input size of the YOLO pose model.
pub const POSE_INPUT_SIZE: usize = 640;
pub const POSE_IOU_THRESHOLD: f32 = 0.45;

/// A loaded model with one image input and one output of interest.
pub struct OnnxModel {
    session: Session,
    input: &'static str,
    output: &'static str,
}

impl OnnxModel {
    pub fn load(
        path: impl AsRef<Path>,
        input: &'static str,
        output: &'static str,
    ) -> Result<Self, InferError> {
        let path = path.as_ref();
        let session = Session::builder()
            .map_err(|e| InferError::ModelLoad(format!("failed to create session builder: {e}")))?
            .commit_from_file(path)
            .map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?;
        log::info!("loaded model {}", path.display());

        Ok(Self {
            session,
            input,
            output,
        })
    }

    /// Run the letterboxed frame, returning the output shape and values.
    pub fn run(
        &mut self,
        frame: &Frame,
        letterbox: &Letterbox,
    ) -> Result<(Vec<usize>, Vec<f32>), InferError> {
        let array = Array4::from_shape_vec(
            (1, 3, letterbox.height, letterbox.width),
            letterbox.tensor(frame),
        )
        .map_err(|e| InferError::Shape(format!("failed to build input: {e}")))?;
        let tensor = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Runtime(format!("failed to create tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![self.input => tensor])
            .map_err(|e| InferError::Runtime(format!("inference failed: {e}")))?;

        let output = outputs[self.output]
            .try_extract_array::<f32>()
            .map_err(|e| InferError::Runtime(format!("output '{}' is not f32: {e}", self.output)))?;

        Ok((output.shape().to_vec(), output.iter().copied().collect()))
    }
}

/// YOLOv8-pose keeping the nose of the best `max_poses` people.
pub struct OnnxPoseModel {
    model: OnnxModel,
    max_poses: usize,
    conf_threshold: f32,
}

impl OnnxPoseModel {
    pub fn load(
        path: impl AsRef<Path>,
        max_poses: usize,
        conf_threshold: f32,
    ) -> Result<Self, InferError> {
        Ok(Self {
            model: OnnxModel::load(path, "images", "output0")?,
            max_poses,
            conf_threshold,
        })
    }
}

impl LandmarkModel for OnnxPoseModel {
    type Output = PoseLandmarks;

    fn detect(&mut self, frame: &Frame, timestamp_ms: u64) -> Result<PoseLandmarks, InferError> {
        let letterbox = Letterbox::fit(frame.width(), frame.height(), POSE_INPUT_SIZE, None)?;
        let (shape, data) = self.model.run(frame, &letterbox)?;
        let poses = decode_poses(
            &data,
            &shape,
            &letterbox,
            self.conf_threshold,
            POSE_IOU_THRESHOLD,
        )?;

        Ok(PoseLandmarks::from_detections(
            &poses,
            frame.width(),
            frame.height(),
            self.max_poses,
            timestamp_ms,
        ))
    }
}

/// DirectMHP head pose model with NMS baked in, emitting rows of
/// `x1, y1, x2, y2, conf, class, pitch, yaw, roll`.
pub struct OnnxHeadPose {
    model: OnnxModel,
    img_size: usize,
    stride: usize,
}

impl OnnxHeadPose {
    pub fn load(path: impl AsRef<Path>, img_size: usize, stride: usize) -> Result<Self, InferError> {
        Ok(Self {
            model: OnnxModel::load(path, "input", "output")?,
            img_size,
            stride,
        })
    }
}

impl BatchDetector for OnnxHeadPose {
    fn infer(&mut self, frame: &Frame) -> Result<RawDetections, InferError> {
        let letterbox = Letterbox::fit(
            frame.width(),
            frame.height(),
            self.img_size,
            Some(self.stride),
        )?;
        let (shape, data) = self.model.run(frame, &letterbox)?;

        if shape.last() != Some(&HEAD_POSE_ROW) {
            return Err(InferError::Shape(format!(
                "expected [.., N, {HEAD_POSE_ROW}], got {shape:?}"
            )));
        }

        let rows = data
            .chunks_exact(HEAD_POSE_ROW)
            .map(|chunk| {
                let mut row = [0.0; HEAD_POSE_ROW];
                row.copy_from_slice(chunk);
                row
            })
            .collect();

        Ok(RawDetections { letterbox, rows })
    }
}
