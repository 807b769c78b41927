use crate::core::assembly::{Topology, Triangles, assemble};
use crate::core::geometry::{Vertex, VertexOut};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices, in model space.
    pub vertices: Vec<Vertex>,
    /// Index buffer, read according to `topology`.
    pub indices: Vec<u32>,
    pub topology: Topology,
    /// Model-to-world transform.
    pub world_matrix: Matrix4<f32>,
    /// Transformed vertices, parallel to `vertices`, rebuilt every frame.
    pub vertices_out: Vec<VertexOut>,
}

impl Mesh {
    /// Creates a mesh, checking that every index refers to an existing vertex.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: Topology,
        world_matrix: Matrix4<f32>,
    ) -> Result<Self, String> {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(format!(
                "Index {} out of range for a mesh with {} vertices",
                bad,
                vertices.len()
            ));
        }

        Ok(Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices,
            topology,
            world_matrix,
        })
    }

    /// Triangles of this mesh as vertex index triples.
    pub fn triangles(&self) -> Triangles<'_> {
        assemble(&self.indices, self.topology)
    }

    /// Creates a simple triangle mesh for testing purposes.
    ///
    /// Vertices are arranged clockwise as seen from a camera looking down +Z.
    pub fn create_test_triangle() -> Self {
        let vertices = vec![
            Vertex::new(
                Point3::new(0.0, 0.5, 0.0), // Top
                Vector3::new(1.0, 0.0, 0.0),
                Vector2::new(0.5, 0.0),
            ),
            Vertex::new(
                Point3::new(0.5, -0.5, 0.0), // Bottom Right
                Vector3::new(0.0, 1.0, 0.0),
                Vector2::new(1.0, 1.0),
            ),
            Vertex::new(
                Point3::new(-0.5, -0.5, 0.0), // Bottom Left
                Vector3::new(0.0, 0.0, 1.0),
                Vector2::new(0.0, 1.0),
            ),
        ];

        Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices: vec![0, 1, 2],
            topology: Topology::TriangleList,
            world_matrix: Matrix4::identity(),
        }
    }

    /// A 6x6 quad at z = -2 split into a 3x3 vertex grid, UV-mapped over [0, 1].
    ///
    /// The strip variant joins its two rows with repeated indices; both
    /// variants cover the same eight triangles.
    pub fn create_quad_grid(topology: Topology) -> Self {
        let mut vertices = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                let u = col as f32 * 0.5;
                let v = row as f32 * 0.5;
                vertices.push(Vertex::new(
                    Point3::new(-3.0 + col as f32 * 3.0, 3.0 - row as f32 * 3.0, -2.0),
                    Vector3::new(1.0, 0.0, 0.0),
                    Vector2::new(u, v),
                ));
            }
        }

        let indices = match topology {
            Topology::TriangleList => vec![
                3, 0, 1, 1, 4, 3, 4, 1, 2, 2, 5, 4, //
                6, 3, 4, 4, 7, 6, 7, 4, 5, 5, 8, 7,
            ],
            Topology::TriangleStrip => vec![3, 0, 4, 1, 5, 2, 2, 6, 6, 3, 7, 4, 8, 5],
        };

        Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
        }
    }
}
