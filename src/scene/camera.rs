use crate::core::math::transform::TransformFactory;
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};

/// Manages the camera basis and the View and Projection matrices.
///
/// Left-handed: the camera looks down its `forward` axis (+Z by default)
/// with `right` (+X) and `up` (+Y).
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,

    // --- Orthonormal basis, re-derived from `forward` on every update ---
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,

    // --- Orientation accumulated by the controller, in radians ---
    pub total_pitch: f32,
    pub total_yaw: f32,

    // --- Projection parameters ---
    /// Vertical field of view in degrees.
    pub fov_angle: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Cached Matrices ---
    fov: f32,
    inv_view_matrix: Matrix4<f32>,
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    /// Creates a camera looking down +Z with near/far planes of 0.1/100.
    pub fn new(origin: Point3<f32>, fov_angle: f32, aspect_ratio: f32) -> Self {
        Self::with_clip_planes(origin, fov_angle, aspect_ratio, 0.1, 100.0)
    }

    pub fn with_clip_planes(
        origin: Point3<f32>,
        fov_angle: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            origin,
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            total_pitch: 0.0,
            total_yaw: 0.0,
            fov_angle,
            aspect_ratio,
            near,
            far,
            fov: 1.0,
            inv_view_matrix: Matrix4::identity(),
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Points the camera along `forward` and syncs yaw/pitch with it.
    pub fn look_along(&mut self, forward: Vector3<f32>) {
        let Some(forward) = forward.try_normalize(f32::EPSILON) else {
            warn!("Ignoring zero-length camera direction");
            return;
        };
        self.forward = forward;
        self.total_pitch = (-forward.y).clamp(-1.0, 1.0).asin();
        self.total_yaw = forward.x.atan2(forward.z);
        self.update_matrices();
    }

    /// Re-derives the basis from `forward` and recalculates every matrix.
    pub fn update_matrices(&mut self) {
        self.update_view_matrix();
        self.update_projection_matrix();
    }

    fn update_view_matrix(&mut self) {
        self.forward = self.forward.try_normalize(f32::EPSILON).unwrap_or(Vector3::z());

        // Looking straight up or down leaves the world-up cross product empty;
        // keep the previous right axis in that case.
        if let Some(right) = Vector3::y().cross(&self.forward).try_normalize(1e-6) {
            self.right = right;
        }
        self.up = self.forward.cross(&self.right);

        self.inv_view_matrix =
            TransformFactory::basis(&self.right, &self.up, &self.forward, &self.origin);

        match self.inv_view_matrix.try_inverse() {
            Some(view) => self.view_matrix = view,
            None => warn!("Camera basis is singular; keeping the previous view matrix"),
        }
    }

    fn update_projection_matrix(&mut self) {
        self.fov = (self.fov_angle.to_radians() / 2.0).tan();
        self.projection_matrix =
            TransformFactory::perspective_fov_lh(self.aspect_ratio, self.fov, self.near, self.far);
    }

    /// `tan(fov / 2)`.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn basis_is_orthonormal() {
        let mut cam = Camera::new(Point3::new(1.0, 2.0, 3.0), 60.0, 1.0);
        cam.look_along(Vector3::new(0.3, -0.4, 0.8));

        for axis in [cam.forward, cam.up, cam.right] {
            assert!((axis.norm() - 1.0).abs() < TOLERANCE);
        }
        assert!(cam.forward.dot(&cam.up).abs() < TOLERANCE);
        assert!(cam.forward.dot(&cam.right).abs() < TOLERANCE);
        assert!(cam.up.dot(&cam.right).abs() < TOLERANCE);
        assert!(cam.up.y > 0.0, "up stays on the world-up side");
    }

    #[test]
    fn view_times_inverse_view_is_identity() {
        let mut cam = Camera::new(Point3::new(-4.0, 1.0, -10.0), 45.0, 16.0 / 9.0);
        cam.look_along(Vector3::new(1.0, 0.2, 1.0));

        let product = cam.view_matrix() * cam.inv_view_matrix();
        assert!((product - Matrix4::identity()).norm() < TOLERANCE);
    }

    #[test]
    fn default_camera_looks_down_positive_z() {
        let cam = Camera::new(Point3::new(0.0, 0.0, -10.0), 90.0, 1.0);
        let in_front = cam.view_matrix().transform_point(&Point3::origin());
        assert!((in_front - Point3::new(0.0, 0.0, 10.0)).norm() < TOLERANCE);
        assert_eq!(cam.right, Vector3::x());
        assert_eq!(cam.up, Vector3::y());
        assert!((cam.fov() - 1.0).abs() < TOLERANCE, "tan(45°) for a 90° fov");
    }

    #[test]
    fn vertical_direction_keeps_previous_right() {
        let mut cam = Camera::new(Point3::origin(), 60.0, 1.0);
        cam.look_along(Vector3::y());
        assert_eq!(cam.right, Vector3::x());
        assert!(cam.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn look_along_syncs_yaw_and_pitch() {
        let mut cam = Camera::new(Point3::origin(), 60.0, 1.0);
        cam.look_along(Vector3::x());
        assert!((cam.total_yaw - std::f32::consts::FRAC_PI_2).abs() < TOLERANCE);
        assert!(cam.total_pitch.abs() < TOLERANCE);
    }
}
