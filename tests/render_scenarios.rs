use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};
use strip_rasterizer::core::assembly::Topology;
use strip_rasterizer::core::color::unpack_rgb8;
use strip_rasterizer::core::framebuffer::FrameBuffer;
use strip_rasterizer::core::geometry::{Vertex, VertexOut};
use strip_rasterizer::core::rasterizer::{RasterStats, Rasterizer};
use strip_rasterizer::io::config::Config;
use strip_rasterizer::pipeline::renderer::Renderer;
use strip_rasterizer::pipeline::shaders::unlit::UnlitShader;
use strip_rasterizer::scene::camera::Camera;
use strip_rasterizer::scene::context::RenderContext;
use strip_rasterizer::scene::loader::build_context;
use strip_rasterizer::scene::mesh::Mesh;
use strip_rasterizer::scene::texture::Texture;

const BACKGROUND: u32 = 0xFF_64_64_64;

/// A transformed vertex landing on pixel coordinates `(sx, sy)` of a `size`x`size` target.
fn screen_vertex(sx: f32, sy: f32, depth: f32, size: f32, color: Vector3<f32>) -> VertexOut {
    let ndc = Point3::new(sx / size * 2.0 - 1.0, 1.0 - sy / size * 2.0, depth);
    VertexOut {
        position: Vector4::new(ndc.x, ndc.y, ndc.z, 1.0),
        ndc: Some(ndc),
        color,
        texcoord: Vector2::zeros(),
        normal: Vector3::z(),
        tangent: Vector3::x(),
        view_direction: Vector3::z(),
    }
}

fn draw(fb: &mut FrameBuffer, tri: [&VertexOut; 3]) -> RasterStats {
    let mut stats = RasterStats::default();
    Rasterizer::new().rasterize_triangle(fb, &UnlitShader, tri, &mut stats);
    stats
}

fn assert_rgb_close(packed: Option<u32>, expected: [u8; 3]) {
    let rgb = unpack_rgb8(packed.expect("pixel in bounds"));
    for (got, want) in rgb.iter().zip(expected) {
        assert!(got.abs_diff(want) <= 1, "{rgb:?} vs {expected:?}");
    }
}

#[test]
fn single_red_triangle() {
    let mut fb = FrameBuffer::new(400, 400);
    fb.clear(BACKGROUND, f32::MAX);

    let red = Vector3::x();
    let a = screen_vertex(100.0, 100.0, 0.5, 400.0, red);
    let b = screen_vertex(200.0, 100.0, 0.5, 400.0, red);
    let c = screen_vertex(150.0, 200.0, 0.5, 400.0, red);
    let stats = draw(&mut fb, [&a, &b, &c]);

    assert_eq!(stats.triangles, 1);
    assert!(stats.pixels_shaded > 4000, "{stats:?}");

    assert_rgb_close(fb.get_pixel(150, 150), [255, 0, 0]);
    assert_rgb_close(fb.get_pixel(150, 101), [255, 0, 0]);
    // Outside: above the top edge, beside the slanted edges, and far away.
    assert_eq!(fb.get_pixel(150, 98), Some(BACKGROUND));
    assert_eq!(fb.get_pixel(105, 190), Some(BACKGROUND));
    assert_eq!(fb.get_pixel(10, 10), Some(BACKGROUND));
    assert_eq!(fb.get_depth(10, 10), Some(f32::MAX));
    assert!((fb.get_depth(150, 150).unwrap() - 0.5).abs() < 1e-5);
}

#[test]
fn nearer_triangle_wins_in_either_order() {
    let green = Vector3::y();
    let blue = Vector3::z();
    let near = [
        screen_vertex(20.0, 20.0, 0.2, 100.0, green),
        screen_vertex(80.0, 20.0, 0.2, 100.0, green),
        screen_vertex(50.0, 80.0, 0.2, 100.0, green),
    ];
    let far = [
        screen_vertex(10.0, 40.0, 0.6, 100.0, blue),
        screen_vertex(90.0, 40.0, 0.6, 100.0, blue),
        screen_vertex(50.0, 95.0, 0.6, 100.0, blue),
    ];

    for near_first in [true, false] {
        let mut fb = FrameBuffer::new(100, 100);
        fb.clear(BACKGROUND, f32::MAX);

        let order = if near_first { [&near, &far] } else { [&far, &near] };
        for [a, b, c] in order {
            draw(&mut fb, [a, b, c]);
        }

        assert_rgb_close(fb.get_pixel(50, 45), [0, 255, 0]);
        // Only the far triangle reaches this low.
        assert_rgb_close(fb.get_pixel(50, 88), [0, 0, 255]);
        assert!((fb.get_depth(50, 45).unwrap() - 0.2).abs() < 1e-5);
    }
}

#[test]
fn textured_grid_maps_texels_to_quadrants() {
    #[rustfmt::skip]
    let texels = vec![
        255, 0, 0,    0, 255, 0,
        0, 0, 255,    255, 255, 255,
    ];

    for topology in [Topology::TriangleList, Topology::TriangleStrip] {
        let mut context = RenderContext {
            camera: Camera::new(Point3::new(0.0, 0.0, -10.0), 60.0, 1.0),
            meshes: vec![Mesh::create_quad_grid(topology)],
            texture: Some(Texture::from_rgb8(2, 2, texels.clone()).unwrap()),
        };

        let mut renderer = Renderer::new(64, 64);
        let stats = renderer.render(&mut context);
        assert_eq!(stats.raster.triangles, 8);

        let fb = &renderer.framebuffer;
        assert_rgb_close(fb.get_pixel(20, 20), [255, 0, 0]);
        assert_rgb_close(fb.get_pixel(44, 20), [0, 255, 0]);
        assert_rgb_close(fb.get_pixel(20, 44), [0, 0, 255]);
        assert_rgb_close(fb.get_pixel(44, 44), [255, 255, 255]);
        assert_eq!(fb.get_pixel(2, 2), Some(BACKGROUND));
    }
}

#[test]
fn strip_and_list_configs_cover_the_same_pixels() {
    let coverage = |topology: &str| {
        let config = Config::from_toml(&format!(
            r#"
            [render]
            width = 80
            height = 60

            [[meshes]]
            shape = "quad_{topology}"
            "#
        ))
        .unwrap();

        let mut context = build_context(&config).unwrap();
        let mut renderer = Renderer::new(80, 60);
        renderer.render(&mut context);
        renderer
            .framebuffer
            .color_buffer()
            .iter()
            .filter(|&&c| c != BACKGROUND)
            .count()
    };

    let list = coverage("list");
    assert!(list > 0);
    assert_eq!(list, coverage("strip"));
}

#[test]
fn unsupported_topology_is_skipped_while_the_rest_renders() {
    let config = Config::from_toml(
        r#"
        [render]
        width = 48
        height = 48

        [[meshes]]
        topology = "fan"
        indices = [0, 1, 2]
        vertices = [
            { position = [0.0, 1.0, 0.0] },
            { position = [1.0, 0.0, 0.0] },
            { position = [-1.0, 0.0, 0.0] },
        ]

        [[meshes]]
        shape = "triangle"
        scale = [4.0, 4.0, 4.0]
        "#,
    )
    .unwrap();

    let mut context = build_context(&config).unwrap();
    assert_eq!(context.meshes.len(), 1);

    let mut renderer = Renderer::new(48, 48);
    let stats = renderer.render(&mut context);
    assert_eq!(stats.meshes, 1);
    assert!(stats.raster.pixels_shaded > 0);
}

#[test]
fn mesh_behind_the_camera_draws_nothing() {
    // The quad sits at z = -2; the camera is past it, looking away.
    let mut context = RenderContext {
        camera: Camera::new(Point3::new(0.0, 0.0, 5.0), 60.0, 1.0),
        meshes: vec![Mesh::create_quad_grid(Topology::TriangleStrip)],
        texture: None,
    };

    let mut renderer = Renderer::new(32, 32);
    let stats = renderer.render(&mut context);

    assert_eq!(stats.raster.pixels_shaded, 0);
    assert!(renderer.framebuffer.color_buffer().iter().all(|&c| c == BACKGROUND));
}

#[test]
fn distant_geometry_under_a_deep_far_plane_is_drawn() {
    let vertices = [(-5.0e4, -5.0e4), (5.0e4, -5.0e4), (0.0, 5.0e4)]
        .into_iter()
        .map(|(x, y)| Vertex::new(Point3::new(x, y, 2.0e5), Vector3::x(), Vector2::zeros()))
        .collect();
    let mesh = Mesh::new(vertices, vec![0, 1, 2], Topology::TriangleList, Matrix4::identity()).unwrap();

    let mut context = RenderContext {
        camera: Camera::with_clip_planes(Point3::origin(), 60.0, 1.0, 1.0, 1.0e6),
        meshes: vec![mesh],
        texture: None,
    };

    let mut renderer = Renderer::new(32, 32);
    let stats = renderer.render(&mut context);

    assert!(stats.raster.pixels_shaded > 0, "{stats:?}");
    assert_eq!(stats.raster.range_rejected, 0);
    assert_rgb_close(renderer.framebuffer.get_pixel(16, 16), [255, 0, 0]);
}
