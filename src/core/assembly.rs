use std::fmt;
use std::str::FromStr;

/// How an index buffer maps onto triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Every three consecutive indices form an independent triangle.
    #[default]
    TriangleList,
    /// Every index plus the previous two forms a triangle; winding alternates.
    TriangleStrip,
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "triangle_list" | "trianglelist" => Ok(Topology::TriangleList),
            "strip" | "triangle_strip" | "trianglestrip" => Ok(Topology::TriangleStrip),
            other => Err(format!("Unsupported primitive topology: '{}'", other)),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::TriangleList => write!(f, "triangle_list"),
            Topology::TriangleStrip => write!(f, "triangle_strip"),
        }
    }
}

/// Lazy sequence of triangles, as vertex index triples, read from an index buffer.
///
/// Triangles that reference the same vertex twice are skipped; strips use such
/// repeated indices to join disconnected runs.
#[derive(Debug, Clone)]
pub struct Triangles<'a> {
    indices: &'a [u32],
    topology: Topology,
    cursor: usize,
}

/// Walks `indices` under `topology`.
pub fn assemble(indices: &[u32], topology: Topology) -> Triangles<'_> {
    Triangles {
        indices,
        topology,
        cursor: 0,
    }
}

#[inline(always)]
fn is_degenerate(tri: &[usize; 3]) -> bool {
    tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0]
}

impl Iterator for Triangles<'_> {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let i = self.cursor;
            let window = self.indices.get(i..i + 3)?;
            let (a, b, c) = (window[0] as usize, window[1] as usize, window[2] as usize);

            let tri = match self.topology {
                Topology::TriangleList => {
                    self.cursor += 3;
                    [a, b, c]
                }
                Topology::TriangleStrip => {
                    self.cursor += 1;
                    // Odd windows have flipped winding; swap first and third to restore it.
                    if i % 2 == 1 { [c, b, a] } else { [a, b, c] }
                }
            };

            if !is_degenerate(&tri) {
                return Some(tri);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indices.len().saturating_sub(self.cursor);
        let upper = match self.topology {
            Topology::TriangleList => remaining / 3,
            Topology::TriangleStrip => remaining.saturating_sub(2),
        };
        (0, Some(upper))
    }
}
