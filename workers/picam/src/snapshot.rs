use {
    crate::{Cameras, PicamError},
    base::Frame,
    std::{
        path::{Path, PathBuf},
        time::{SystemTime, UNIX_EPOCH},
    },
    video::{CaptureRig, RigConfig},
};

/// Default snapshot locations: `cam1/<millis>.png` and `cam2/<millis>.png`.
pub fn default_paths(dir: &Path) -> (PathBuf, PathBuf) {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    (
        dir.join("cam1").join(format!("{stamp}.png")),
        dir.join("cam2").join(format!("{stamp}.png")),
    )
}

/// Capture one matched pair with a fresh rig and release the cameras.
pub async fn capture_once(config: &RigConfig, cameras: Cameras) -> Result<(Frame, Frame), PicamError> {
    let mut rig = CaptureRig::start(config, cameras).await?;
    let pair = rig.capture_pair().await;
    rig.shutdown().await;
    Ok(pair?)
}

/// Write an RGB frame as PNG, creating parent directories.
pub fn save_png(frame: &Frame, path: &Path) -> Result<(), PicamError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image::save_buffer_with_format(
        path,
        frame.pixels(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    log::info!("wrote {}", path.display());
    Ok(())
}
