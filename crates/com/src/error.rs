use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ComError {
    Io(std::io::Error),
    /// Zero bytes where the protocol expected the start of a field.
    ConnectionClosed,
    /// The peer closed partway through a field.
    IncompleteRead { expected: usize, received: usize },
    MessageTooLarge(u32),
    Malformed(String),
    Bind { path: PathBuf, source: std::io::Error },
}

impl ComError {
    /// Whether the error only means the peer went away.
    pub fn is_disconnect(&self) -> bool {
        match self {
            ComError::ConnectionClosed | ComError::IncompleteRead { .. } => true,
            ComError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComError::Io(err) => write!(f, "io error: {err}"),
            ComError::ConnectionClosed => write!(f, "connection closed"),
            ComError::IncompleteRead { expected, received } => {
                write!(f, "incomplete read: expected {expected} bytes, received {received}")
            }
            ComError::MessageTooLarge(len) => write!(f, "message too large: {len} bytes"),
            ComError::Malformed(msg) => write!(f, "malformed message: {msg}"),
            ComError::Bind { path, source } => {
                write!(f, "failed to bind {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ComError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComError::Io(err) | ComError::Bind { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        ComError::Io(err)
    }
}

impl From<base::FrameError> for ComError {
    fn from(err: base::FrameError) -> Self {
        ComError::Malformed(err.to_string())
    }
}
