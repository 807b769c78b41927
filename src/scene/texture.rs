use image::{Rgb, RgbImage};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// Represents a decoded 2D RGB texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture '{}': {}", path_ref.display(), e))?;

        let texture = Self::from_image(img.to_rgb8())?;
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref,
            texture.width(),
            texture.height()
        );
        Ok(texture)
    }

    /// Wraps raw RGB8 bytes, row-major from the top-left texel.
    pub fn from_rgb8(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, String> {
        let image = RgbImage::from_raw(width, height, bytes)
            .ok_or_else(|| format!("Pixel data does not match a {}x{} RGB image", width, height))?;
        Self::from_image(image)
    }

    /// Two-color checkerboard with `cell`-texel squares.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        let image = RgbImage::from_fn(width.max(1), height.max(1), |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 { Rgb(a) } else { Rgb(b) }
        });
        Self { image }
    }

    fn from_image(image: RgbImage) -> Result<Self, String> {
        if image.width() == 0 || image.height() == 0 {
            return Err("Texture has no pixels".to_string());
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Samples the texture with nearest-neighbour lookup.
    /// UV (0, 0) is the top-left texel; coordinates outside [0, 1] are clamped.
    pub fn sample(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let u = uv.x.clamp(0.0, 1.0);
        let v = uv.y.clamp(0.0, 1.0);

        // u == 1.0 would land one texel past the edge.
        let (width, height) = self.image.dimensions();
        let x = ((u * width as f32) as u32).min(width.saturating_sub(1));
        let y = ((v * height as f32) as u32).min(height.saturating_sub(1));

        let pixel = self.image.get_pixel(x, y);

        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}
