use crate::core::math::transform::{TransformFactory, transform_vector};
use crate::io::config::{CameraConfig, InputConfig};
use crate::scene::camera::Camera;
use nalgebra::{Vector2, Vector3};

/// Snapshot of the user input driving the camera for one update.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    /// Relative mouse movement in pixels since the previous update.
    pub mouse_delta: Vector2<f32>,
    pub left_button: bool,
    pub right_button: bool,
}

impl From<&InputConfig> for InputState {
    fn from(config: &InputConfig) -> Self {
        Self {
            forward: config.forward,
            back: config.back,
            left: config.left,
            right: config.right,
            boost: config.boost,
            mouse_delta: Vector2::from(config.mouse_delta),
            left_button: config.left_button,
            right_button: config.right_button,
        }
    }
}

/// Free-flying camera controls.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Units per second.
    pub speed: f32,
    /// Speed multiplier while boost is held.
    pub boost_factor: f32,
    /// Degrees per pixel of mouse movement.
    pub sensitivity: f32,
    /// Pitch limit in degrees, either way.
    pub max_pitch: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(5.0, 0.5)
    }
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            boost_factor: 4.0,
            sensitivity,
            max_pitch: 89.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.speed, config.sensitivity)
    }

    /// Applies one update of `dt` seconds to the camera, then rebuilds its matrices.
    pub fn update(&self, input: &InputState, camera: &mut Camera, dt: f32) {
        let mut speed = self.speed * dt;
        if input.boost {
            speed *= self.boost_factor;
        }

        // --- Keyboard ---
        let mut direction = Vector3::zeros();
        if input.forward {
            direction += camera.forward;
        }
        if input.back {
            direction -= camera.forward;
        }
        if input.left {
            direction -= camera.right;
        }
        if input.right {
            direction += camera.right;
        }
        camera.origin += direction * speed;

        // --- Mouse ---
        // Left drags move: along forward alone, along right with the right
        // button also held. The right button turns.
        let delta = input.mouse_delta;
        if input.left_button {
            let axis = if input.right_button { camera.right } else { camera.forward };
            camera.origin += axis * (-delta.y * speed);
        }
        if input.right_button {
            let (yaw, pitch) = self.orientation_after(camera, delta.x, delta.y);
            camera.total_yaw = yaw;
            camera.total_pitch = pitch;
            let rotation = TransformFactory::rotation_y(yaw) * TransformFactory::rotation_x(pitch);
            camera.forward = transform_vector(&rotation, &Vector3::z());
        }

        camera.update_matrices();
    }

    fn orientation_after(&self, camera: &Camera, dx: f32, dy: f32) -> (f32, f32) {
        let limit = self.max_pitch.to_radians();
        let yaw = camera.total_yaw + (dx * self.sensitivity).to_radians();
        let pitch = (camera.total_pitch + (dy * self.sensitivity).to_radians()).clamp(-limit, limit);
        (yaw, pitch)
    }
}
