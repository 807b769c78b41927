use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Vertex color, each channel in [0, 1].
    pub color: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    /// Normal vector.
    pub normal: Vector3<f32>,
    /// Tangent vector.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, color: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            color,
            texcoord,
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn with_normal(mut self, normal: Vector3<f32>, tangent: Vector3<f32>) -> Self {
        self.normal = normal;
        self.tangent = tangent;
        self
    }
}

/// Output of the vertex stage, one per input [`Vertex`], rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    /// Homogeneous clip-space position, before the perspective divide.
    pub position: Vector4<f32>,
    /// Normalized device position after the divide.
    /// `None` when `w` was zero and the divide is undefined.
    pub ndc: Option<Point3<f32>>,
    pub color: Vector3<f32>,
    pub texcoord: Vector2<f32>,
    /// World-space normal.
    pub normal: Vector3<f32>,
    /// World-space tangent.
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}
