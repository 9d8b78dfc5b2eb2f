use lumen_chunk::ChunkPosition;
use lumen_geom::Vec3;

use crate::face::Face;

/// What the renderer receives per vertex. Positions are in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub lighting: [f32; 3],
}

/// Geometry for one face bucket of a chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl FaceMesh {
    /// Clears all arrays but retains capacity for reuse.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 4);
        self.indices.reserve(n_quads * 6);
    }

    /// Appends a quad as two triangles sharing the `a`-`c` diagonal. The
    /// corners must already be counter-clockwise seen from outside.
    pub fn add_quad(&mut self, corners: [Vec3; 4], lighting: [f32; 4], color: [u8; 4]) {
        let base = self.vertices.len() as u32;
        for (p, l) in corners.into_iter().zip(lighting) {
            self.vertices.push(Vertex {
                position: p.to_array(),
                color,
                lighting: [l; 3],
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Tessellated geometry of one chunk, bucketed by face orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub position: ChunkPosition,
    pub faces: [FaceMesh; 6],
}

impl ChunkMesh {
    pub fn new(position: ChunkPosition) -> Self {
        Self {
            position,
            faces: Default::default(),
        }
    }

    #[inline]
    pub fn face(&self, face: Face) -> &FaceMesh {
        &self.faces[face.index()]
    }

    #[inline]
    pub fn face_mut(&mut self, face: Face) -> &mut FaceMesh {
        &mut self.faces[face.index()]
    }

    pub fn quad_count(&self) -> usize {
        self.faces.iter().map(FaceMesh::quad_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.vertices.len()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.faces.iter().map(|f| f.indices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(FaceMesh::is_empty)
    }
}
