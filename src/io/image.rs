use crate::core::color::unpack_rgb8;
use crate::core::framebuffer::FrameBuffer;
use chrono::Local;
use image::RgbImage;
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// Converts the packed color buffer into an RGB image, one row per task.
pub fn framebuffer_to_image(framebuffer: &FrameBuffer) -> Result<RgbImage, String> {
    let width = framebuffer.width();
    let colors = framebuffer.color_buffer();
    let mut bytes = vec![0u8; width * framebuffer.height() * 3];

    if width > 0 {
        bytes
            .par_chunks_mut(width * 3)
            .zip(colors.par_chunks(width))
            .for_each(|(row, packed)| {
                for (pixel, &color) in row.chunks_exact_mut(3).zip(packed) {
                    pixel.copy_from_slice(&unpack_rgb8(color));
                }
            });
    }

    RgbImage::from_raw(width as u32, framebuffer.height() as u32, bytes)
        .ok_or_else(|| "Frame buffer size does not match its dimensions".to_string())
}

/// Saves the color buffer to `path`. The format follows the extension
/// (`.png`, `.bmp`, ...).
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), String> {
    let path = path.as_ref();
    framebuffer_to_image(framebuffer)?
        .save(path)
        .map_err(|e| format!("Failed to save image to '{}': {}", path.display(), e))?;

    info!("Saved {}", path.display());
    Ok(())
}

/// `Rasterizer_ColorBuffer_<timestamp>.bmp`
pub fn default_screenshot_name() -> String {
    format!(
        "Rasterizer_ColorBuffer_{}.bmp",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}
