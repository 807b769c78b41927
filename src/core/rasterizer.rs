use crate::core::color::{max_to_one, pack_rgb};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{
    barycentric_coordinates, edge_function, interpolate, is_inside_triangle,
    perspective_correct_barycentric, perspective_correct_depth,
};
use crate::core::math::transform::ndc_to_screen;
use crate::core::pipeline::{Fragment, Shader};
use nalgebra::Point2;
use std::ops::AddAssign;

/// Twice the screen-space area below which a triangle is considered flat.
const AREA_EPSILON: f32 = 1e-5;

/// Counters describing what happened to the triangles and fragments of a draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    /// Triangles handed to the rasterizer.
    pub triangles: usize,
    /// Triangles dropped before scanning: zero area, undefined divide, bad index.
    pub triangles_skipped: usize,
    /// Fragments that won the depth test and were written.
    pub pixels_shaded: usize,
    /// Fragments that lost against the stored depth.
    pub depth_rejected: usize,
    /// Fragments whose depth fell outside [0, 1] or could not be computed.
    pub range_rejected: usize,
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles += rhs.triangles;
        self.triangles_skipped += rhs.triangles_skipped;
        self.pixels_shaded += rhs.pixels_shaded;
        self.depth_rejected += rhs.depth_rejected;
        self.range_rejected += rhs.range_rejected;
    }
}

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
///
/// It keeps no state between triangles; everything persistent lives in the
/// frame buffer it is handed.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    /// Pixels added on every side of a triangle's bounding box.
    pub margin: f32,
    /// Where inside a pixel the coverage test samples: 0.5 for the centre,
    /// 0.0 for the top-left corner.
    pub sample_offset: f32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            margin: 1.0,
            sample_offset: 0.5,
        }
    }

    /// Rasterize a single triangle of transformed vertices.
    ///
    /// Steps: screen mapping, bounding box, coverage test through edge
    /// functions, perspective-correct depth, range and depth test, attribute
    /// interpolation, shading and write.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        vertices: [&VertexOut; 3],
        stats: &mut RasterStats,
    ) {
        stats.triangles += 1;

        let width = framebuffer.width() as f32;
        let height = framebuffer.height() as f32;

        // 1. Screen mapping
        let mut screen_coords = [Point2::origin(); 3];
        let mut depths = [0.0; 3];
        let mut w_values = [0.0; 3];

        for (i, vertex) in vertices.iter().enumerate() {
            let Some(ndc) = vertex.ndc else {
                stats.triangles_skipped += 1;
                return;
            };
            screen_coords[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
            depths[i] = ndc.z;
            w_values[i] = vertex.position.w;
        }

        let [v0, v1, v2] = screen_coords;
        let area_x2 = edge_function(v0, v1, v2);
        if !area_x2.is_finite() || area_x2.abs() < AREA_EPSILON {
            stats.triangles_skipped += 1;
            return;
        }

        // 2. Bounding box
        let (start_x, start_y, end_x, end_y) =
            self.compute_bounding_box(&screen_coords, width, height);

        let colors = vertices.map(|v| v.color);
        let texcoords = vertices.map(|v| v.texcoord);
        let normals = vertices.map(|v| v.normal);
        let tangents = vertices.map(|v| v.tangent);
        let view_directions = vertices.map(|v| v.view_direction);

        // 3. Pixel loop, row by row
        for y in start_y..end_y {
            for x in start_x..end_x {
                let sample = Point2::new(
                    x as f32 + self.sample_offset,
                    y as f32 + self.sample_offset,
                );

                let Some(bary) = barycentric_coordinates(sample, v0, v1, v2) else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }

                let (Some(depth), Some(weights)) = (
                    perspective_correct_depth(bary, depths),
                    perspective_correct_barycentric(bary, w_values),
                ) else {
                    stats.range_rejected += 1;
                    continue;
                };

                if !(0.0..=1.0).contains(&depth) {
                    stats.range_rejected += 1;
                    continue;
                }

                if !framebuffer.depth_test_and_update(x, y, depth) {
                    stats.depth_rejected += 1;
                    continue;
                }

                let fragment = Fragment {
                    pixel: Point2::new(x, y),
                    depth,
                    color: interpolate(colors, weights),
                    texcoord: interpolate(texcoords, weights),
                    normal: interpolate(normals, weights),
                    tangent: interpolate(tangents, weights),
                    view_direction: interpolate(view_directions, weights),
                };

                let color = max_to_one(shader.fragment(&fragment));
                framebuffer.set_pixel(x, y, pack_rgb(color));
                stats.pixels_shaded += 1;
            }
        }
    }

    /// Pixel bounds `[start, end)` of a triangle, grown by the margin and
    /// clamped to the buffer.
    fn compute_bounding_box(
        &self,
        points: &[Point2<f32>; 3],
        width: f32,
        height: f32,
    ) -> (usize, usize, usize, usize) {
        let min_x = points[0].x.min(points[1].x).min(points[2].x) - self.margin;
        let min_y = points[0].y.min(points[1].y).min(points[2].y) - self.margin;
        let max_x = points[0].x.max(points[1].x).max(points[2].x) + self.margin;
        let max_y = points[0].y.max(points[1].y).max(points[2].y) + self.margin;

        (
            min_x.clamp(0.0, width) as usize,
            min_y.clamp(0.0, height) as usize,
            max_x.clamp(0.0, width) as usize,
            max_y.clamp(0.0, height) as usize,
        )
    }
}
