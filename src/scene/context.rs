use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;

/// Holds all scene resources required for rendering.
pub struct RenderContext {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    /// Shared by every mesh; `None` renders vertex colors.
    pub texture: Option<Texture>,
}
