//! Output vertex buffers.
//!
//! Non-indexed triangle list, six vertices per quad. Attributes are stored
//! as separate tightly packed streams, ready for upload:
//!
//! | Stream    | Per vertex | Layout                                  |
//! |-----------|------------|-----------------------------------------|
//! | positions | 3 × f32    | lattice coordinates                     |
//! | normals   | 3 × u8     | 128 + sign on the face axis, 128 else   |
//! | colors    | 4 × u8     | r, g, b, brightness (shaded variants)   |

use crate::voxel::palette::Palette;

/// Positions per quad (two triangles, no index buffer).
pub const VERTICES_PER_QUAD: usize = 6;

/// One decoded output vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Lattice-space position.
    pub position: [f32; 3],
    /// Normal bytes.
    pub normal: [u8; 3],
    /// Color and brightness, if the variant writes colors.
    pub color: Option<[u8; 4]>,
}

/// Growable vertex streams written by the emitter.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<f32>,
    normals: Vec<u8>,
    colors: Vec<u8>,
    with_color: bool,
}

impl MeshBuilder {
    /// Creates empty streams. `with_color` controls whether colors are kept.
    #[must_use]
    pub fn new(with_color: bool) -> Self {
        Self {
            with_color,
            ..Self::default()
        }
    }

    /// Makes room for one more quad. Growth is amortized by `Vec`.
    #[inline]
    pub fn reserve_quad(&mut self) {
        self.positions.reserve(VERTICES_PER_QUAD * 3);
        self.normals.reserve(VERTICES_PER_QUAD * 3);
        if self.with_color {
            self.colors.reserve(VERTICES_PER_QUAD * 4);
        }
    }

    /// Appends one vertex. `color` is dropped when colors are off.
    #[inline]
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [u8; 3], color: [u8; 4]) {
        self.positions.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
        if self.with_color {
            self.colors.extend_from_slice(&color);
        }
    }

    /// Vertices written so far.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Trims the streams to their exact length and attaches the palette.
    #[must_use]
    pub fn finish(mut self, palette: Palette) -> Mesh {
        self.positions.shrink_to_fit();
        self.normals.shrink_to_fit();
        self.colors.shrink_to_fit();

        Mesh {
            positions: self.positions,
            normals: self.normals,
            colors: self.colors,
            with_color: self.with_color,
            palette,
        }
    }
}

/// A finished mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<f32>,
    normals: Vec<u8>,
    colors: Vec<u8>,
    with_color: bool,
    palette: Palette,
}

impl Mesh {
    /// Flat position stream, 3 floats per vertex.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Position stream as raw bytes.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat normal stream, 3 bytes per vertex.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[u8] {
        &self.normals
    }

    /// Flat color stream, 4 bytes per vertex. Empty when colors are off.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Whether this mesh carries a color stream.
    #[inline]
    #[must_use]
    pub const fn has_colors(&self) -> bool {
        self.with_color
    }

    /// The palette used to color the mesh.
    #[inline]
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Number of quads.
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertex_count() / VERTICES_PER_QUAD
    }

    /// Returns true if no faces were emitted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Decodes one vertex.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<MeshVertex> {
        if index >= self.vertex_count() {
            return None;
        }
        let p = &self.positions[index * 3..index * 3 + 3];
        let n = &self.normals[index * 3..index * 3 + 3];
        let color = self
            .with_color
            .then(|| {
                let c = &self.colors[index * 4..index * 4 + 4];
                [c[0], c[1], c[2], c[3]]
            });

        Some(MeshVertex {
            position: [p[0], p[1], p[2]],
            normal: [n[0], n[1], n[2]],
            color,
        })
    }

    /// All vertices in order.
    pub fn vertices(&self) -> impl Iterator<Item = MeshVertex> + '_ {
        (0..self.vertex_count()).filter_map(|i| self.vertex(i))
    }

    /// All triangles in order.
    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        (0..self.triangle_count()).filter_map(|t| {
            Some([
                self.vertex(t * 3)?,
                self.vertex(t * 3 + 1)?,
                self.vertex(t * 3 + 2)?,
            ])
        })
    }

    /// Splits into the raw streams `(positions, normals, colors)`.
    #[must_use]
    pub fn into_streams(self) -> (Vec<f32>, Vec<u8>, Vec<u8>) {
        (self.positions, self.normals, self.colors)
    }
}
