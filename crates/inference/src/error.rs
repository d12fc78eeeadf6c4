use {base::FrameError, std::fmt};

#[derive(Debug)]
pub enum InferError {
    Shape(String),
    Runtime(String),
    ModelLoad(String),
    Frame(FrameError),
    Json(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Frame(err) => write!(f, "frame error: {err}"),
            InferError::Json(msg) => write!(f, "json error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FrameError> for InferError {
    fn from(err: FrameError) -> Self {
        InferError::Frame(err)
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Json(err.to_string())
    }
}
