use {
    crate::{InferError, encode_failure, encode_predictions},
    base::Frame,
    serde::Serialize,
};

/// Blocking `frame -> records` contract every inference worker serves.
pub trait Predictor: Send {
    type Record: Serialize;

    fn predict(&mut self, frame: &Frame) -> Result<Vec<Self::Record>, InferError>;
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    type Record = P::Record;

    fn predict(&mut self, frame: &Frame) -> Result<Vec<Self::Record>, InferError> {
        (**self).predict(frame)
    }
}

/// Run one request and render the reply JSON.
///
/// Never fails: a bad buffer or a model error becomes
/// `{"prediction": [], "error": ...}`.
pub fn predict_json<P: Predictor + ?Sized>(
    predictor: &mut P,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
) -> String {
    let result = Frame::new(width, height, pixels)
        .map_err(InferError::from)
        .and_then(|frame| predictor.predict(&frame))
        .and_then(|records| encode_predictions(&records));

    match result {
        Ok(json) => json,
        Err(e) => {
            log::warn!("prediction failed: {}", e);
            encode_failure(&e.to_string())
        }
    }
}
