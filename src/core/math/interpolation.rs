use crate::core::math::transform::W_EPSILON;
use nalgebra::{Point2, Vector3};
use std::ops::{Add, Mul};

const EPSILON: f32 = 1e-5;

/// Types that can be blended linearly across a triangle's surface.
pub trait Interpolatable: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// Signed edge function: twice the signed area of triangle (a, b, p).
/// Positive when `p` lies to one side of the directed edge a -> b, negative on
/// the other, zero on the line.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Calculates the barycentric weights (w0, w1, w2) of point p with respect
/// to triangle (v0, v1, v2).
///
/// Each weight is the edge function of the edge opposite its vertex, divided
/// by the signed doubled area, so the result is independent of winding.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let total_area_x2 = edge_function(v0, v1, v2);

    if total_area_x2.abs() < EPSILON {
        return None;
    }

    let inv_total_area_x2 = 1.0 / total_area_x2;

    Some(Vector3::new(
        edge_function(v1, v2, p) * inv_total_area_x2,
        edge_function(v2, v0, p) * inv_total_area_x2,
        edge_function(v0, v1, p) * inv_total_area_x2,
    ))
}

/// Checks if the barycentric weights represent a point inside the triangle
/// (edges included).
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

/// Perspective-correct depth: `1 / (b0/z0 + b1/z1 + b2/z2)`.
///
/// Returns `None` if any vertex depth is near zero or the denominator is not
/// a usable finite value.
pub fn perspective_correct_depth(bary: Vector3<f32>, depths: [f32; 3]) -> Option<f32> {
    if depths.iter().any(|z| z.abs() < EPSILON) {
        return None;
    }

    let sum = bary.x / depths[0] + bary.y / depths[1] + bary.z / depths[2];
    if !usable_denominator(sum) {
        return None;
    }
    Some(1.0 / sum)
}

/// Compute perspective-correct barycentric weights.
///
///   wa = b0 / w0, wb = b1 / w1, wc = b2 / w2
///   sum = wa + wb + wc
///   b0' = wa / sum, ...
///
/// Blending attributes with the corrected weights equals
/// `W * (b0*a0/w0 + b1*a1/w1 + b2*a2/w2)` with `W = 1/sum`.
///
/// Returns `None` when a `w` is one the perspective divide would also refuse,
/// or the sum cannot be inverted. The sum shrinks like `1/w`, so only a true
/// zero (not merely a small value) is refused.
pub fn perspective_correct_barycentric(bary: Vector3<f32>, w: [f32; 3]) -> Option<Vector3<f32>> {
    if w.iter().any(|w| w.abs() < W_EPSILON) {
        return None;
    }

    let wa = bary.x / w[0];
    let wb = bary.y / w[1];
    let wc = bary.z / w[2];

    let sum = wa + wb + wc;
    if !usable_denominator(sum) {
        return None;
    }
    Some(Vector3::new(wa / sum, wb / sum, wc / sum))
}

#[inline(always)]
fn usable_denominator(sum: f32) -> bool {
    sum.is_finite() && sum.abs() >= f32::MIN_POSITIVE
}

/// Blends three per-vertex values with the given weights.
#[inline(always)]
pub fn interpolate<T: Interpolatable>(values: [T; 3], weights: Vector3<f32>) -> T {
    values[0] * weights.x + values[1] * weights.y + values[2] * weights.z
}
