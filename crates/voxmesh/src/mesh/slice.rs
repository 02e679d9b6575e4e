//! Per-axis slice driver.
//!
//! Walks the lattice one slice at a time along the face axis, loads the
//! slice into the merger and hands each merged rectangle to the variant.

use voxmesh_core::RowMajorShape;

use crate::mesh::axis::Axis;
use crate::mesh::buffers::MeshBuilder;
use crate::mesh::descriptor::PackedDescriptor;
use crate::mesh::emitter::SliceQuad;
use crate::mesh::greedy::GreedyMerger;
use crate::mesh::strategy::{EmitContext, SurfaceStrategy};

/// Slice extents for an axis: `(depth, rows, cols)`.
///
/// Rows run along the first in-plane axis and columns along the second.
/// `planar_offset` drops the high rows and columns that belong to the
/// adjacent axes' caps.
#[must_use]
pub fn slice_extents(lattice: &RowMajorShape, axis: Axis, planar_offset: u32) -> (u32, u32, u32) {
    let dims = lattice.dims();
    (
        dims[axis.index()],
        dims[axis.u()].saturating_sub(planar_offset),
        dims[axis.v()].saturating_sub(planar_offset),
    )
}

/// Merges and emits every slice of one axis. Returns the number of quads.
#[allow(clippy::too_many_arguments)]
pub fn mesh_axis<S: SurfaceStrategy>(
    strategy: &S,
    axis: Axis,
    field: &[PackedDescriptor],
    lattice: &RowMajorShape,
    planar_offset: u32,
    merger: &mut GreedyMerger,
    ctx: &EmitContext<'_>,
    out: &mut MeshBuilder,
) -> usize {
    let (depth, rows, cols) = slice_extents(lattice, axis, planar_offset);
    let roles = axis.roles();
    let mut quads = 0;

    for i in 0..depth {
        merger.load(rows, cols, |row, col| {
            let mut p = [0; 3];
            p[axis.index()] = i;
            p[axis.u()] = row;
            p[axis.v()] = col;
            field[lattice.linearize(p)]
        });

        merger.merge(|rect, word| {
            let Some(face) = word.unpack() else {
                return;
            };
            let quad = SliceQuad {
                lo: [rect.col, rect.row],
                hi: [rect.col + rect.width, rect.row + rect.height],
                depth: i,
            };
            strategy.emit_quad(&quad, face, roles, ctx, out);
            quads += 1;
        });
    }

    quads
}
