//! Command line of the `picam` binary.

use {
    crate::{Backend, DEFAULT_SOCKET},
    clap::{Args, Parser, Subcommand},
    std::{path::PathBuf, time::Duration},
    video::{CameraConfig, DEFAULT_CAPTURE_TIMEOUT_MS, RigConfig},
};

#[derive(Parser, Debug)]
#[command(name = "picam", about = "Dual-camera capture worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub rig: RigArgs,

    #[arg(long, global = true, default_value = DEFAULT_SOCKET)]
    pub socket: PathBuf,

    /// Send `width, height` before every frame.
    #[arg(long, global = true)]
    pub echo_dimensions: bool,

    /// Write logs to date-named files in this directory instead of stdout.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Serve frame pairs on a Unix socket (default).
    Serve,
    /// Capture one matched pair and save both frames as PNG.
    Snapshot {
        #[arg(long)]
        f1: Option<PathBuf>,

        #[arg(long)]
        f2: Option<PathBuf>,

        /// Base directory for the default `cam1/` and `cam2/` paths.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RigArgs {
    #[arg(long, global = true, default_value_t = 1296)]
    pub width1: u32,

    #[arg(long, global = true, default_value_t = 972)]
    pub height1: u32,

    #[arg(long, global = true, default_value_t = 1296)]
    pub width2: u32,

    #[arg(long, global = true, default_value_t = 972)]
    pub height2: u32,

    #[arg(long, global = true, default_value_t = 0)]
    pub camera1: u32,

    #[arg(long, global = true, default_value_t = 1)]
    pub camera2: u32,

    /// How long one capture request may wait for both cameras.
    #[arg(long, global = true, default_value_t = DEFAULT_CAPTURE_TIMEOUT_MS)]
    pub capture_timeout_ms: u64,

    #[arg(long, global = true, value_enum, default_value_t = Backend::Pattern)]
    pub backend: Backend,
}

impl RigArgs {
    pub fn rig_config(&self) -> RigConfig {
        RigConfig::new(
            CameraConfig::default()
                .with_index(self.camera1)
                .with_width(self.width1)
                .with_height(self.height1),
            CameraConfig::default()
                .with_index(self.camera2)
                .with_width(self.width2)
                .with_height(self.height2),
        )
        .with_capture_timeout(Duration::from_millis(self.capture_timeout_ms))
    }
}
