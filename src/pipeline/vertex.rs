use crate::core::geometry::{Vertex, VertexOut};
use crate::core::math::transform::{apply_perspective_division, to_clip_space, transform_vector};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};

/// `world`, then `view`, then `projection`.
pub fn world_view_projection(world: &Matrix4<f32>, camera: &Camera) -> Matrix4<f32> {
    camera.projection_matrix() * camera.view_matrix() * world
}

/// Runs the fixed-function vertex stage for a single vertex.
pub fn transform_vertex(vertex: &Vertex, world: &Matrix4<f32>, wvp: &Matrix4<f32>) -> VertexOut {
    let position = to_clip_space(wvp, &vertex.position);

    VertexOut {
        position,
        ndc: apply_perspective_division(&position),
        color: vertex.color,
        texcoord: vertex.texcoord,
        normal: renormalize(transform_vector(world, &vertex.normal)),
        tangent: renormalize(transform_vector(world, &vertex.tangent)),
        view_direction: renormalize(position.xyz()),
    }
}

/// Transforms every vertex of `mesh` for this frame, replacing `mesh.vertices_out`.
pub fn process_mesh(mesh: &mut Mesh, camera: &Camera) {
    let wvp = world_view_projection(&mesh.world_matrix, camera);
    let world = mesh.world_matrix;

    mesh.vertices_out.clear();
    mesh.vertices_out.extend(
        mesh.vertices
            .iter()
            .map(|vertex| transform_vertex(vertex, &world, &wvp)),
    );
}

#[inline]
fn renormalize(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
