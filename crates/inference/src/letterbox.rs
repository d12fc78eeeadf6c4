use {crate::InferError, base::Frame};

/// Grey used for letterbox borders.
pub const PAD_VALUE: u8 = 114;

/// Geometry of a letterbox resize: scale to fit, then pad.
///
/// Model coordinates map back to the source frame with
/// `(x - pad_x) / scale`, `(y - pad_y) / scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    /// Size of the padded canvas fed to the model.
    pub width: usize,
    pub height: usize,
    /// Size of the scaled image inside the canvas.
    pub resized_width: usize,
    pub resized_height: usize,
}

impl Letterbox {
    /// Fit a `width` x `height` frame into a `target` square.
    ///
    /// With a `stride`, only the padding needed to reach a multiple of it is
    /// kept, so the canvas may be smaller than `target` on one side.
    pub fn fit(
        width: u32,
        height: u32,
        target: usize,
        stride: Option<usize>,
    ) -> Result<Self, InferError> {
        if width == 0 || height == 0 || target == 0 {
            return Err(InferError::Shape(format!(
                "cannot letterbox {width}x{height} into {target}"
            )));
        }

        let scale = (target as f32 / width as f32).min(target as f32 / height as f32);
        let resized_width = ((width as f32 * scale).round() as usize).clamp(1, target);
        let resized_height = ((height as f32 * scale).round() as usize).clamp(1, target);

        let mut pad_w = target - resized_width;
        let mut pad_h = target - resized_height;
        if let Some(stride) = stride.filter(|s| *s > 0) {
            pad_w %= stride;
            pad_h %= stride;
        }

        Ok(Self {
            scale,
            pad_x: (pad_w / 2) as f32,
            pad_y: (pad_h / 2) as f32,
            width: resized_width + pad_w,
            height: resized_height + pad_h,
            resized_width,
            resized_height,
        })
    }

    /// Map a point from model space back to the source frame.
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }

    /// Build the NCHW `[1, 3, height, width]` input in `[0, 1]`.
    ///
    /// Uses nearest-neighbour sampling; the border is `PAD_VALUE`.
    pub fn tensor(&self, frame: &Frame) -> Vec<f32> {
        let (src_w, src_h) = (frame.width() as usize, frame.height() as usize);
        let plane = self.width * self.height;
        let pad = PAD_VALUE as f32 / 255.0;
        let mut data = vec![pad; 3 * plane];

        let pixels = frame.pixels();
        let (left, top) = (self.pad_x as usize, self.pad_y as usize);
        for y in 0..self.resized_height {
            let src_y = ((y as f32 / self.scale) as usize).min(src_h - 1);
            for x in 0..self.resized_width {
                let src_x = ((x as f32 / self.scale) as usize).min(src_w - 1);
                let src = (src_y * src_w + src_x) * 3;
                let dst = (y + top) * self.width + x + left;
                for ch in 0..3 {
                    data[ch * plane + dst] = pixels[src + ch] as f32 / 255.0;
                }
            }
        }

        data
    }
}
