use crate::core::color::pack_rgb;
use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{RasterStats, Rasterizer};
use crate::pipeline::shaders::textured::TexturedShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::pipeline::vertex;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use log::{debug, warn};
use nalgebra::Vector3;

/// What the buffers are reset to at the start of every frame.
#[derive(Debug, Clone, Copy)]
pub struct ClearOptions {
    pub color: Vector3<f32>,
    pub depth: f32,
}

impl Default for ClearOptions {
    fn default() -> Self {
        Self {
            color: Vector3::repeat(100.0 / 255.0),
            depth: f32::MAX,
        }
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// 1-based frame number.
    pub frame: u64,
    pub meshes: usize,
    pub raster: RasterStats,
}

/// The high-level renderer that owns the frame buffers and hands out frames.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
    pub clear_options: ClearOptions,
    frame_count: u64,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
            clear_options: ClearOptions::default(),
            frame_count: 0,
        }
    }

    /// Reallocates the frame buffers for a new output size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.framebuffer.resize(width, height);
    }

    /// Starts a frame: clears color and depth and borrows the buffers until
    /// the returned [`Frame`] is finished.
    pub fn begin_frame<'a>(&'a mut self, camera: &'a Camera) -> Frame<'a> {
        self.frame_count += 1;
        self.framebuffer
            .clear(pack_rgb(self.clear_options.color), self.clear_options.depth);

        Frame {
            camera,
            rasterizer: &self.rasterizer,
            framebuffer: &mut self.framebuffer,
            stats: FrameStats {
                frame: self.frame_count,
                ..Default::default()
            },
        }
    }

    /// Renders every mesh of the context into a fresh frame.
    pub fn render(&mut self, context: &mut RenderContext) -> FrameStats {
        let RenderContext {
            camera,
            meshes,
            texture,
        } = context;

        let mut frame = self.begin_frame(camera);
        for mesh in meshes.iter_mut() {
            frame.draw_mesh(mesh, texture.as_ref());
        }
        frame.finish()
    }
}

/// A frame in progress. Holds exclusive access to the frame buffers, so
/// nothing else can touch them until [`Frame::finish`].
pub struct Frame<'a> {
    camera: &'a Camera,
    rasterizer: &'a Rasterizer,
    framebuffer: &'a mut FrameBuffer,
    stats: FrameStats,
}

impl Frame<'_> {
    /// Runs one mesh through the whole pipeline: vertex transform, primitive
    /// assembly, then rasterization of every triangle.
    ///
    /// With a texture the fragments are texture-sampled; otherwise the
    /// vertex colors are blended.
    pub fn draw_mesh(&mut self, mesh: &mut Mesh, texture: Option<&Texture>) {
        vertex::process_mesh(mesh, self.camera);
        self.stats.meshes += 1;

        match texture {
            Some(texture) => self.draw_triangles(mesh, &TexturedShader::new(texture)),
            None => self.draw_triangles(mesh, &UnlitShader),
        }
    }

    fn draw_triangles<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        let out = &mesh.vertices_out;

        for [i0, i1, i2] in mesh.triangles() {
            let (Some(v0), Some(v1), Some(v2)) = (out.get(i0), out.get(i1), out.get(i2)) else {
                warn!(
                    "Skipping triangle ({}, {}, {}): index out of range for {} vertices",
                    i0,
                    i1,
                    i2,
                    out.len()
                );
                self.stats.raster.triangles_skipped += 1;
                continue;
            };

            self.rasterizer.rasterize_triangle(
                self.framebuffer,
                shader,
                [v0, v1, v2],
                &mut self.stats.raster,
            );
        }
    }

    pub fn finish(self) -> FrameStats {
        let s = &self.stats;
        debug!(
            "Frame {}: {} meshes, {} triangles ({} skipped), {} pixels shaded, {} depth-rejected, {} out of range",
            s.frame,
            s.meshes,
            s.raster.triangles,
            s.raster.triangles_skipped,
            s.raster.pixels_shaded,
            s.raster.depth_rejected,
            s.raster.range_rejected
        );
        self.stats
    }
}
