use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

/// Below this magnitude a homogeneous `w` is treated as zero.
pub const W_EPSILON: f32 = 1e-6;

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
/// Left-handed coordinate system: +X right, +Y up, +Z into the screen.
/// Matrices act on column vectors, so `a * b` applies `b` first.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation in degrees, applied Z first, then X, then Y.
    pub fn rotation_euler_deg(degrees: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_y(degrees.y.to_radians())
            * Self::rotation_x(degrees.x.to_radians())
            * Self::rotation_z(degrees.z.to_radians())
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Camera-to-world matrix built from an orthonormal basis and an origin.
    /// The basis vectors become the first three columns, the origin the fourth.
    pub fn basis(
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
        origin: &Point3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::new(
            right.x, up.x, forward.x, origin.x,
            right.y, up.y, forward.y, origin.y,
            right.z, up.z, forward.z, origin.z,
            0.0,     0.0,  0.0,       1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    /// Maps view-space X/Y to [-1, 1] after the divide and depth to [0, 1]
    /// between `near` and `far`. The resulting `w` equals view-space Z.
    ///
    /// `fov` is `tan(fov_y / 2)`.
    pub fn perspective_fov_lh(aspect_ratio: f32, fov: f32, near: f32, far: f32) -> Matrix4<f32> {
        let range = far / (far - near);

        Matrix4::new(
            1.0 / (aspect_ratio * fov), 0.0,       0.0,   0.0,
            0.0,                        1.0 / fov, 0.0,   0.0,
            0.0,                        0.0,       range, -near * range,
            0.0,                        0.0,       1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Transforms a point (w = 1) into homogeneous clip space.
#[inline]
pub fn to_clip_space(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Vector4<f32> {
    matrix * point.to_homogeneous()
}

/// Transforms a direction, ignoring the translation part of the matrix.
#[inline]
pub fn transform_vector(matrix: &Matrix4<f32>, vector: &Vector3<f32>) -> Vector3<f32> {
    matrix.transform_vector(vector)
}

/// Performs perspective division: Clip Space -> NDC.
/// Returns `None` when `w` is too close to zero for the divide to be meaningful.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w.abs() < W_EPSILON {
        return None;
    }
    let inv_w = 1.0 / w;
    Some(Point3::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w))
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}
