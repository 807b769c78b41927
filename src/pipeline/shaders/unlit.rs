use crate::core::pipeline::{Fragment, Shader};
use nalgebra::Vector3;

/// Colors each fragment with the blended vertex colors.
/// Used when a mesh is drawn without a texture.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlitShader;

impl Shader for UnlitShader {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        fragment.color
    }
}
