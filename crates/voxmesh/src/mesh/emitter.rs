//! Quad emission.
//!
//! A quad is two triangles over the corners `(x0,y0) (x1,y0) (x1,y1) (x0,y1)`
//! of a merged rectangle. Winding depends on the facing and on which
//! diagonal the quad is cut along; every combination below is
//! counter-clockwise when seen from outside the solid.

use crate::config::ShadingConfig;
use crate::mesh::axis::AxisRoles;
use crate::mesh::buffers::MeshBuilder;

/// Neutral normal component.
pub const NORMAL_ZERO: u8 = 128;

/// A merged rectangle placed in its slice.
///
/// `lo`/`hi` are `(X, Y)` bounds in the slice plane; see [`AxisRoles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceQuad {
    /// Low corner.
    pub lo: [u32; 2],
    /// High corner (exclusive bound of the covered cells).
    pub hi: [u32; 2],
    /// Slice index along the face axis.
    pub depth: u32,
}

/// Diagonal along which a quad is split into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// Through corners `(0,0)` and `(1,1)`.
    Primary,
    /// Through corners `(1,0)` and `(0,1)`.
    Secondary,
}

/// Per-corner brightness, indexed `[x][y]` with 0 = low, 1 = high.
pub type CornerShade = [[u8; 2]; 2];

/// Brightness bytes for the four corner AO levels.
///
/// `levels` is in `(0,0) (1,0) (1,1) (0,1)` order.
#[must_use]
pub fn corner_shade(levels: [u8; 4], shading: &ShadingConfig) -> CornerShade {
    let [a00, a10, a11, a01] = levels.map(|l| shading.brightness(l));
    [[a00, a01], [a10, a11]]
}

/// Picks the split that keeps occlusion gradients symmetric.
///
/// When the `(0,0)-(1,1)` pair is darker overall, the quad is cut along the
/// other diagonal so the two dark corners do not share an edge. Ties go to
/// the pair with the brighter extreme.
#[must_use]
pub fn choose_diagonal(shade: &CornerShade) -> Diagonal {
    let (a00, a10, a11, a01) = (
        u16::from(shade[0][0]),
        u16::from(shade[1][0]),
        u16::from(shade[1][1]),
        u16::from(shade[0][1]),
    );
    let primary = a00 + a11;
    let secondary = a10 + a01;

    let cut_secondary = if primary == secondary {
        a00.max(a11) < a10.max(a01)
    } else {
        primary < secondary
    };

    if cut_secondary {
        Diagonal::Secondary
    } else {
        Diagonal::Primary
    }
}

/// Corner order for six vertices, as `(x, y)` selectors.
pub type VertexOrder = [(usize, usize); 6];

const SECONDARY_POS: VertexOrder = [(0, 0), (0, 1), (1, 0), (1, 1), (1, 0), (0, 1)];
const SECONDARY_NEG: VertexOrder = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 1), (1, 0)];
const PRIMARY_POS: VertexOrder = [(0, 0), (0, 1), (1, 1), (1, 1), (1, 0), (0, 0)];
const PRIMARY_NEG: VertexOrder = [(0, 1), (0, 0), (1, 1), (1, 0), (1, 1), (0, 0)];

/// Vertex order for a split and facing.
#[must_use]
pub const fn vertex_order(diagonal: Diagonal, flip: bool) -> &'static VertexOrder {
    match (diagonal, flip) {
        (Diagonal::Secondary, false) => &SECONDARY_POS,
        (Diagonal::Secondary, true) => &SECONDARY_NEG,
        (Diagonal::Primary, false) => &PRIMARY_POS,
        (Diagonal::Primary, true) => &PRIMARY_NEG,
    }
}

/// Normal bytes for a face on `axis`, pointing toward `-axis` when `flip`.
#[must_use]
pub fn normal_bytes(axis: usize, flip: bool) -> [u8; 3] {
    let mut normal = [NORMAL_ZERO; 3];
    normal[axis] = if flip { NORMAL_ZERO - 1 } else { NORMAL_ZERO + 1 };
    normal
}

/// Writes one quad as six vertices.
///
/// Each vertex color is `rgb` plus the brightness of its corner.
pub fn write_quad(
    out: &mut MeshBuilder,
    quad: &SliceQuad,
    roles: AxisRoles,
    flip: bool,
    rgb: [u8; 3],
    shade: &CornerShade,
    order: &VertexOrder,
) {
    let normal = normal_bytes(roles.depth, flip);
    let xs = [quad.lo[0], quad.hi[0]];
    let ys = [quad.lo[1], quad.hi[1]];

    out.reserve_quad();
    for &(xi, yi) in order {
        let p = roles.place(xs[xi], ys[yi], quad.depth);
        out.push_vertex(
            p.map(|c| c as f32),
            normal,
            [rgb[0], rgb[1], rgb[2], shade[xi][yi]],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::axis::Axis;
    use crate::voxel::palette::Palette;

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    #[test]
    fn test_normal_bytes() {
        assert_eq!(normal_bytes(0, false), [129, 128, 128]);
        assert_eq!(normal_bytes(2, true), [128, 128, 127]);
    }

    #[test]
    fn test_corner_shade_mapping() {
        let shade = corner_shade([0, 1, 2, 3], &ShadingConfig::default());
        assert_eq!(shade[0][0], 0);
        assert_eq!(shade[1][0], 153);
        assert_eq!(shade[1][1], 204);
        assert_eq!(shade[0][1], 255);
    }

    #[test]
    fn test_choose_diagonal() {
        // Uniform: no preference, primary split
        assert_eq!(choose_diagonal(&[[255, 255], [255, 255]]), Diagonal::Primary);
        // Dark (0,0) corner: cut away from it
        assert_eq!(choose_diagonal(&[[153, 255], [255, 255]]), Diagonal::Secondary);
        // Dark (1,0) corner
        assert_eq!(choose_diagonal(&[[255, 255], [153, 255]]), Diagonal::Primary);
        // Tie on sums, secondary pair has the brighter extreme
        assert_eq!(choose_diagonal(&[[204, 255], [153, 204]]), Diagonal::Secondary);
        // Tie on sums, primary pair has the brighter extreme
        assert_eq!(choose_diagonal(&[[153, 204], [204, 255]]), Diagonal::Primary);
    }

    /// Every order must produce triangles whose geometric normal agrees
    /// with the face normal.
    #[test]
    fn test_winding_matches_normal() {
        let quad = SliceQuad {
            lo: [0, 0],
            hi: [2, 3],
            depth: 1,
        };
        for axis in Axis::ALL {
            for diagonal in [Diagonal::Primary, Diagonal::Secondary] {
                for flip in [false, true] {
                    let mut out = MeshBuilder::new(false);
                    let shade = [[255; 2]; 2];
                    write_quad(
                        &mut out,
                        &quad,
                        axis.roles(),
                        flip,
                        [0; 3],
                        &shade,
                        vertex_order(diagonal, flip),
                    );
                    let mesh = out.finish(Palette::new());

                    let expected = if flip { -1.0 } else { 1.0 };
                    for [a, b, c] in mesh.triangles().map(|t| t.map(|v| v.position)) {
                        let n = cross(sub(b, a), sub(c, a));
                        assert!(
                            n[axis.index()] * expected > 0.0,
                            "axis {axis:?} {diagonal:?} flip {flip}: {n:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_colors_follow_vertices() {
        let quad = SliceQuad {
            lo: [0, 0],
            hi: [1, 1],
            depth: 0,
        };
        let shade = [[10, 40], [20, 30]];
        let mut out = MeshBuilder::new(true);
        write_quad(
            &mut out,
            &quad,
            Axis::Z.roles(),
            false,
            [1, 2, 3],
            &shade,
            vertex_order(Diagonal::Primary, false),
        );
        let mesh = out.finish(Palette::new());

        // Axis Z: X on world y, Y on world x
        for v in mesh.vertices() {
            let (x, y) = (v.position[1] as usize, v.position[0] as usize);
            assert_eq!(v.color, Some([1, 2, 3, shade[x][y]]));
        }
    }
}
