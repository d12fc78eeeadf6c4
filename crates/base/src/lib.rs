//! Shared foundations for the capture and inference workers.

pub mod frame;
pub mod logging;

pub use frame::{Frame, FrameError, RGB_CHANNELS};
pub use logging::{
    FileLogger, StdoutLogger, init_file_logger, init_file_logger_with_level, init_stdout_logger,
    init_stdout_logger_with_level,
};

// Re-export log crate so downstream crates can use base::log::*
pub use log;
