//! Dual-camera worker.
//!
//! Serves matched frame pairs from two cameras to one coordinator at a time,
//! and can take a single stereo snapshot to disk.

pub mod backend;
pub mod cli;
pub mod error;
pub mod session;
pub mod snapshot;

pub use backend::{Backend, Cameras, open_cameras};
pub use error::PicamError;
pub use session::PicamSession;
pub use snapshot::{capture_once, default_paths, save_png};

pub const DEFAULT_SOCKET: &str = "/tmp/picam.sock";
