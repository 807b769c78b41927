use crate::core::assembly::Topology;
use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::io::config::{CameraConfig, Config, MeshConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use crate::scene::utils::normalize_and_center_mesh;
use log::{info, warn};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Builds the camera described by `[camera]` for a `width`x`height` target.
pub fn build_camera(config: &CameraConfig, width: usize, height: usize) -> Camera {
    let aspect_ratio = width as f32 / height.max(1) as f32;
    let mut camera = Camera::with_clip_planes(
        Point3::from(config.origin),
        config.fov,
        aspect_ratio,
        config.near,
        config.far,
    );
    camera.look_along(Vector3::from(config.forward));
    camera
}

/// translation · rotation (Y·X·Z, degrees) · scale
pub fn world_matrix(mesh_conf: &MeshConfig) -> Matrix4<f32> {
    TransformFactory::translation(&Vector3::from(mesh_conf.position))
        * TransformFactory::rotation_euler_deg(&Vector3::from(mesh_conf.rotation))
        * TransformFactory::scaling_nonuniform(&Vector3::from(mesh_conf.scale))
}

/// Builds one mesh from its config entry.
///
/// `Ok(None)` means the entry was skipped with a warning; resource failures
/// are errors.
pub fn build_mesh(mesh_conf: &MeshConfig) -> Result<Option<Mesh>, String> {
    let topology = match mesh_conf.topology.parse::<Topology>() {
        Ok(t) => t,
        Err(e) => {
            warn!("Skipping mesh: {}", e);
            return Ok(None);
        }
    };

    let mut mesh = if let Some(path) = &mesh_conf.path {
        load_obj(path)?
    } else if let Some(shape) = &mesh_conf.shape {
        match shape.to_ascii_lowercase().as_str() {
            "triangle" => Mesh::create_test_triangle(),
            "quad_list" => Mesh::create_quad_grid(Topology::TriangleList),
            "quad_strip" => Mesh::create_quad_grid(Topology::TriangleStrip),
            other => {
                warn!("Skipping mesh: unknown shape '{}'", other);
                return Ok(None);
            }
        }
    } else if !mesh_conf.vertices.is_empty() {
        let vertices = mesh_conf
            .vertices
            .iter()
            .map(|v| {
                Vertex::new(
                    Point3::from(v.position),
                    Vector3::from(v.color),
                    Vector2::from(v.uv),
                )
            })
            .collect();
        Mesh::new(vertices, mesh_conf.indices.clone(), topology, Matrix4::identity())?
    } else {
        warn!("Skipping mesh: no path, shape or vertices given");
        return Ok(None);
    };

    if mesh_conf.normalize {
        let (center, scale) = normalize_and_center_mesh(&mut mesh);
        info!("Mesh normalized. Center: {:?}, Scale: {:.4}", center, scale);
    }

    mesh.world_matrix = world_matrix(mesh_conf);
    Ok(Some(mesh))
}

/// Loads every resource named by the configuration.
pub fn build_context(config: &Config) -> Result<RenderContext, String> {
    let camera = build_camera(&config.camera, config.render.width, config.render.height);

    let texture = config
        .render
        .texture
        .as_ref()
        .map(Texture::load)
        .transpose()?;

    let mut meshes = Vec::with_capacity(config.meshes.len());
    for mesh_conf in &config.meshes {
        if let Some(mesh) = build_mesh(mesh_conf)? {
            meshes.push(mesh);
        }
    }

    info!(
        "Scene initialized with {} meshes ({} triangles){}.",
        meshes.len(),
        meshes.iter().map(|m| m.triangles().count()).sum::<usize>(),
        if texture.is_some() { ", textured" } else { "" }
    );

    Ok(RenderContext {
        camera,
        meshes,
        texture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::VertexConfig;

    fn shape(name: &str) -> MeshConfig {
        MeshConfig {
            shape: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_builds_the_strip_grid() {
        let context = build_context(&Config::default()).unwrap();
        assert_eq!(context.meshes.len(), 1);
        assert_eq!(context.meshes[0].topology, Topology::TriangleStrip);
        assert!(context.texture.is_none());
        assert!((context.camera.aspect_ratio - 640.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn unsupported_topology_skips_only_that_mesh() {
        let mut config = Config::default();
        config.meshes.push(MeshConfig {
            topology: "fan".to_string(),
            ..shape("triangle")
        });

        let context = build_context(&config).unwrap();
        assert_eq!(context.meshes.len(), 1);
    }

    #[test]
    fn unknown_shape_and_empty_entry_are_skipped() {
        assert!(build_mesh(&shape("teapot")).unwrap().is_none());
        assert!(build_mesh(&MeshConfig::default()).unwrap().is_none());
    }

    #[test]
    fn inline_geometry_uses_its_topology() {
        let vertex = |x: f32, y: f32| VertexConfig {
            position: [x, y, 0.0],
            color: [1.0, 0.0, 0.0],
            uv: [0.0, 0.0],
        };
        let conf = MeshConfig {
            vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0), vertex(1.0, 1.0)],
            indices: vec![0, 1, 2, 3],
            topology: "strip".to_string(),
            ..Default::default()
        };

        let mesh = build_mesh(&conf).unwrap().unwrap();
        assert_eq!(mesh.topology, Topology::TriangleStrip);
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn out_of_range_inline_index_is_an_error() {
        let conf = MeshConfig {
            vertices: vec![VertexConfig {
                position: [0.0; 3],
                color: [1.0; 3],
                uv: [0.0; 2],
            }],
            indices: vec![0, 0, 4],
            ..Default::default()
        };
        assert!(build_mesh(&conf).is_err());
    }

    #[test]
    fn missing_resources_are_errors() {
        let mut config = Config::default();
        config.render.texture = Some("missing/texture.png".to_string());
        assert!(build_context(&config).is_err());

        let mut config = Config::default();
        config.meshes = vec![MeshConfig {
            path: Some("missing/model.obj".to_string()),
            ..Default::default()
        }];
        assert!(build_context(&config).is_err());
    }

    #[test]
    fn world_matrix_applies_scale_then_rotation_then_translation() {
        let conf = MeshConfig {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 90.0, 0.0],
            scale: [2.0, 2.0, 2.0],
            ..Default::default()
        };
        let p = world_matrix(&conf).transform_point(&Point3::new(1.0, 0.0, 0.0));
        // rotY(90°) takes +X to -Z
        assert!((p - Point3::new(1.0, 2.0, 1.0)).norm() < 1e-5, "{p:?}");
    }
}
