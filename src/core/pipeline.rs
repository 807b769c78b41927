use nalgebra::{Point2, Vector2, Vector3};

pub use crate::core::math::interpolation::Interpolatable;

/// Per-pixel inputs handed to the shading stage, already interpolated in a
/// perspective-correct way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Pixel coordinates of the fragment.
    pub pixel: Point2<usize>,
    /// Interpolated normalized depth, in [0, 1].
    pub depth: f32,
    pub color: Vector3<f32>,
    pub texcoord: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// Shader represents the programmable color stage of the pipeline.
///
/// The vertex stage is fixed-function (see `pipeline::vertex`); a shader only
/// decides what color a visible fragment gets. The returned color is linear
/// RGB and may exceed 1.0; the rasterizer compresses it with `max_to_one`
/// before packing.
pub trait Shader {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32>;
}
