use crate::core::assembly::Topology;
use crate::core::geometry::Vertex;
use crate::scene::mesh::Mesh;
use log::{info, warn};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into a single triangle-list mesh.
///
/// All models in the file are merged. Missing vertex colors default to white,
/// missing texture coordinates to (0, 0).
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // one index stream for position/normal/UV
        ..Default::default()
    };

    // Materials are not used; a missing MTL file is not an error here.
    let (models, _materials) = tobj::load_obj(path, &load_options)
        .map_err(|e| format!("Failed to load OBJ '{}': {}", path.display(), e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let index_offset = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = mesh.normals.len() >= num_vertices * 3;
        let has_texcoords = mesh.texcoords.len() >= num_vertices * 2;
        let has_colors = mesh.vertex_color.len() >= num_vertices * 3;

        if !has_normals {
            warn!("Mesh '{}' is missing normals, using the default.", model.name);
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let color = if has_colors {
                Vector3::new(
                    mesh.vertex_color[i * 3],
                    mesh.vertex_color[i * 3 + 1],
                    mesh.vertex_color[i * 3 + 2],
                )
            } else {
                Vector3::repeat(1.0)
            };

            // OBJ texture space starts at the bottom-left.
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            let mut vertex = Vertex::new(position, color, texcoord);
            if has_normals {
                let normal = Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                );
                vertex = vertex.with_normal(normal, vertex.tangent);
            }
            vertices.push(vertex);
        }

        indices.extend(mesh.indices.iter().map(|index| index + index_offset));
    }

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Mesh::new(vertices, indices, Topology::TriangleList, Matrix4::identity())
}
