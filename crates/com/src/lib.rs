pub mod client;
pub mod error;
pub mod framing;
pub mod server;

pub use client::{CameraClient, InferenceClient, TRIGGER_FIRST, TRIGGER_SECOND};
pub use error::ComError;
pub use server::{Cycle, ServerState, Session, UnixServer, run_session, shutdown_signal};
