/// Represents a 2D buffer containing color and depth information.
///
/// Both planes are flat row-major arrays addressed as `x + y * width`; all
/// access goes through coordinate accessors that check bounds.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,

    /// Packed `0xAARRGGBB` colors.
    color_buffer: Vec<u32>,
    /// Normalized depth per pixel; smaller is closer.
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::MAX; size],
        }
    }

    /// Reallocates both planes. Contents are lost.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Fills the color plane with `color` and the depth plane with `depth`.
    pub fn clear(&mut self, color: u32, depth: f32) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(depth);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    /// Returns true if `new_depth` is strictly closer than the stored value,
    /// in which case the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let current = &mut self.depth_buffer[idx];
        if new_depth < *current {
            *current = new_depth;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }
}
