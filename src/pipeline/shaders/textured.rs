use crate::core::pipeline::{Fragment, Shader};
use crate::scene::texture::Texture;
use nalgebra::Vector3;

/// Colors each fragment with the texel at its interpolated UV.
pub struct TexturedShader<'a> {
    pub texture: &'a Texture,
}

impl<'a> TexturedShader<'a> {
    pub fn new(texture: &'a Texture) -> Self {
        Self { texture }
    }
}

impl Shader for TexturedShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        self.texture.sample(fragment.texcoord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn samples_at_the_fragment_uv() {
        let texture = Texture::checkerboard(2, 2, 1, [255, 0, 0], [0, 0, 255]);
        let shader = TexturedShader::new(&texture);
        let mut fragment = Fragment {
            pixel: Point2::new(0, 0),
            depth: 0.5,
            color: Vector3::zeros(),
            texcoord: Vector2::new(0.1, 0.1),
            normal: Vector3::z(),
            tangent: Vector3::x(),
            view_direction: Vector3::z(),
        };

        assert_eq!(shader.fragment(&fragment), Vector3::new(1.0, 0.0, 0.0));
        fragment.texcoord = Vector2::new(0.9, 0.1);
        assert_eq!(shader.fragment(&fragment), Vector3::new(0.0, 0.0, 1.0));
    }
}
