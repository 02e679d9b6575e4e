//! Boundary stencils.
//!
//! For axis `d` with in-plane axes `u = (d+1)%3` and `v = (d+2)%3`, the
//! lattice cell `p` compares two padded cells:
//!
//! - near: `p + (0, 1, 1)` in the `(d, u, v)` frame
//! - far:  `p + (1, 1, 1)`
//!
//! A face exists when exactly one of them is solid. Occlusion is sampled on
//! the empty side, from the 3x3 ring around the face in that layer.

use voxmesh_core::RowMajorShape;

use crate::mesh::axis::Axis;
use crate::mesh::descriptor::{FaceDescriptor, PackedDescriptor};
use crate::mesh::strategy::SurfaceStrategy;
use crate::voxel::padding::Lattice;

/// Cells around one lattice cell, addressed in the `(d, u, v)` frame.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a> {
    data: &'a [u32],
    base: usize,
    /// Backing strides for d, u and v.
    step: [usize; 3],
}

impl<'a> Neighborhood<'a> {
    /// Window at the padded cell `origin`, oriented for `axis`.
    #[inline]
    #[must_use]
    pub fn new(data: &'a [u32], shape: &RowMajorShape, origin: [u32; 3], axis: Axis) -> Self {
        let strides = shape.strides();
        Self {
            data,
            base: shape.linearize(origin),
            step: [strides[axis.index()], strides[axis.u()], strides[axis.v()]],
        }
    }

    /// Value at an offset (each 0..=2) from the window origin.
    #[inline]
    #[must_use]
    pub fn at(&self, dd: usize, du: usize, dv: usize) -> u32 {
        self.data[self.base + dd * self.step[0] + du * self.step[1] + dv * self.step[2]]
    }

    /// The low-side cell of the pair.
    #[inline]
    #[must_use]
    pub fn near(&self) -> u32 {
        self.at(0, 1, 1)
    }

    /// The high-side cell of the pair.
    #[inline]
    #[must_use]
    pub fn far(&self) -> u32 {
        self.at(1, 1, 1)
    }

    #[inline]
    fn solid(&self, dd: usize, du: usize, dv: usize) -> u8 {
        u8::from(self.at(dd, du, dv) != 0)
    }
}

/// Returns the solid cell's value and the flip bit, if the pair is a boundary.
#[inline]
#[must_use]
pub fn boundary(near: u32, far: u32) -> Option<(u32, bool)> {
    match (near != 0, far != 0) {
        (true, false) => Some((near, false)),
        (false, true) => Some((far, true)),
        _ => None,
    }
}

/// Occlusion level of one face corner from its two side neighbours and the
/// diagonal. 3 is fully open; two solid sides always give 1.
#[inline]
#[must_use]
pub const fn vertex_ao(side1: u8, side2: u8, corner: u8) -> u8 {
    if side1 == 1 && side2 == 1 {
        1
    } else {
        3 - (side1 + side2 + corner)
    }
}

/// Corner AO levels of a face, in `(0,0) (1,0) (1,1) (0,1)` order.
///
/// `flip` selects the empty layer: the far layer for a face pointing toward
/// `+d`, the near layer for one pointing toward `-d`.
#[must_use]
pub fn corner_ao(hood: &Neighborhood<'_>, flip: bool) -> [u8; 4] {
    let layer = usize::from(!flip);
    let ring = |du: usize, dv: usize| hood.solid(layer, du, dv);

    [
        vertex_ao(ring(1, 0), ring(0, 1), ring(0, 0)),
        vertex_ao(ring(0, 1), ring(1, 2), ring(0, 2)),
        vertex_ao(ring(1, 2), ring(2, 1), ring(2, 2)),
        vertex_ao(ring(2, 1), ring(1, 0), ring(2, 0)),
    ]
}

/// Fills `field` with the packed descriptor of every lattice cell for `axis`.
///
/// `field` is indexed like the lattice shape. Cells past the slice extents
/// are evaluated too; the slice driver never reads them.
pub fn evaluate_field<S: SurfaceStrategy>(
    strategy: &S,
    lattice: &Lattice<'_>,
    axis: Axis,
    field: &mut [PackedDescriptor],
) {
    let shape = lattice.shape();
    let [nx, ny, nz] = shape.dims();
    debug_assert_eq!(field.len(), shape.size());

    let padded = lattice.padded();
    let data = padded.backing();
    let backing = padded.backing_shape();

    let mut idx = 0;
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let hood = Neighborhood::new(data, backing, [x, y, z], axis);
                field[idx] = strategy
                    .evaluate(&hood)
                    .map_or(PackedDescriptor::EMPTY, FaceDescriptor::pack);
                idx += 1;
            }
        }
    }
}
