//! Prediction records and the `{"prediction": [...]}` envelope.

use {crate::InferError, serde::Serialize};

/// Head position: the nose keypoint in pixels of the request frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HeadRecord {
    pub nose_x: f32,
    pub nose_y: f32,
}

/// One oriented head: box in pixels of the request frame, angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HeadPoseRecord {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub conf: f32,
    pub class: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    prediction: &'a [T],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Serialize records as `{"prediction": [...]}`.
pub fn encode_predictions<T: Serialize>(records: &[T]) -> Result<String, InferError> {
    Ok(serde_json::to_string(&Envelope {
        prediction: records,
        error: None,
    })?)
}

/// The reply for a request that could not be answered:
/// `{"prediction": [], "error": "<message>"}`.
pub fn encode_failure(message: &str) -> String {
    let envelope = Envelope::<HeadRecord> {
        prediction: &[],
        error: Some(message),
    };
    serde_json::to_string(&envelope).unwrap_or_else(|_| r#"{"prediction":[]}"#.to_string())
}
