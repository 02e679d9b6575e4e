//! Padded copies of a voxel grid.
//!
//! Grid cell `g` sits at padded cell `g + 1`. The padded grid has a one-cell
//! shell on every side, plus a hidden high-side margin for stencils that read
//! further than one cell ahead. The shell is empty unless the caller fills it
//! with neighbour data; the hidden margin is always empty.
//!
//! ```text
//!  padded index:  0 | 1 .. n | n+1 | n+2 .. n+1+margin
//!                 ^   grid      ^     hidden margin
//!               shell         shell
//! ```

use voxmesh_core::{copy_region, map_region, visit_region_mut, RowMajorShape};

use crate::error::MeshResult;
use crate::voxel::grid::VoxelGrid;
use crate::voxel::palette::{Palette, PaletteBuilder};

/// A grid copied into a zero-initialized padded buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedGrid {
    /// Backing storage, `logical + margin` per axis.
    data: Vec<u32>,
    /// Shape of the backing storage.
    backing: RowMajorShape,
    /// Grid shape plus the one-cell shell on both sides.
    logical: [u32; 3],
    /// Hidden cells past the logical high bound.
    margin: u32,
}

impl PaddedGrid {
    /// Pads a grid with `margin` hidden cells past the high shell.
    #[must_use]
    pub fn new(grid: &VoxelGrid, margin: u32) -> Self {
        Self::with_mapper(grid, margin, |v| v)
    }

    /// Pads a grid, passing every value through `mapper` on the way in.
    #[must_use]
    pub fn with_mapper<F>(grid: &VoxelGrid, margin: u32, mapper: F) -> Self
    where
        F: FnMut(u32) -> u32,
    {
        let logical = grid.layout().dims().map(|d| d + 2);
        let backing = RowMajorShape::new(logical.map(|d| d + margin));
        let mut data = vec![0u32; backing.size()];

        map_region(
            &mut data,
            &backing,
            [1, 1, 1],
            grid.as_slice(),
            grid.layout(),
            mapper,
        );

        Self {
            data,
            backing,
            logical,
            margin,
        }
    }

    /// Grid shape plus the shell, in (x, y, z) order.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> [u32; 3] {
        self.logical
    }

    /// Hidden cells past the high shell.
    #[inline]
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Value at a padded coordinate, or `None` outside the logical shape.
    #[must_use]
    pub fn get(&self, p: [u32; 3]) -> Option<u32> {
        (0..3)
            .all(|axis| p[axis] < self.logical[axis])
            .then(|| self.data[self.backing.linearize(p)])
    }

    /// Backing storage, including the hidden margin.
    #[inline]
    #[must_use]
    pub fn backing(&self) -> &[u32] {
        &self.data
    }

    /// Shape of the backing storage.
    #[inline]
    #[must_use]
    pub const fn backing_shape(&self) -> &RowMajorShape {
        &self.backing
    }

    /// Writes neighbour data into the one-cell shell.
    ///
    /// `f` receives grid-relative coordinates, so shell cells read as `-1`
    /// on the low side and `n` on the high side. Interior cells and the
    /// hidden margin are left alone.
    pub fn fill_border<F>(&mut self, mut f: F)
    where
        F: FnMut([i64; 3]) -> u32,
    {
        let logical = self.logical;
        visit_region_mut(&mut self.data, &self.backing, [0; 3], logical, |p, cell| {
            let on_shell = (0..3).any(|axis| p[axis] == 0 || p[axis] == logical[axis] - 1);
            if on_shell {
                *cell = f(p.map(|c| i64::from(c) - 1));
            }
        });
    }

    /// Grows the hidden margin to at least `margin`, reallocating if needed.
    pub fn ensure_margin(&mut self, margin: u32) {
        if self.margin >= margin {
            return;
        }

        let backing = RowMajorShape::new(self.logical.map(|d| d + margin));
        let mut data = vec![0u32; backing.size()];
        copy_region(&mut data, &backing, [0; 3], &self.data, &self.backing);

        self.data = data;
        self.backing = backing;
        self.margin = margin;
    }

    /// Replaces every logical cell with its palette index, in place.
    ///
    /// Values are visited in row-major order over the padded shape, so a
    /// filled shell contributes colors too.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeshError::PaletteOverflow`] on too many distinct
    /// values. The grid contents are unspecified afterwards.
    pub fn remap_to_palette(&mut self) -> MeshResult<Palette> {
        let mut builder = PaletteBuilder::new();
        let mut failure = None;

        visit_region_mut(&mut self.data, &self.backing, [0; 3], self.logical, |_, cell| {
            if failure.is_some() {
                return;
            }
            match builder.add(*cell) {
                Ok(index) => *cell = u32::from(index),
                Err(e) => failure = Some(e),
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(builder.build()),
        }
    }

    /// The lattice of cell pairs between padded cells.
    ///
    /// `trim` is 1 for a closed surface (caps on every side) and 2 for an
    /// open high end.
    #[must_use]
    pub fn unpad(&self, trim: u32) -> Lattice<'_> {
        Lattice {
            grid: self,
            shape: RowMajorShape::new(self.logical.map(|d| d - trim)),
        }
    }
}

/// Read-only view of a padded grid, shrunk at the high end.
///
/// Lattice cell `p` sits between padded cells `p` and `p + 1` on each axis.
#[derive(Debug)]
pub struct Lattice<'a> {
    grid: &'a PaddedGrid,
    shape: RowMajorShape,
}

impl<'a> Lattice<'a> {
    /// Lattice shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> &RowMajorShape {
        &self.shape
    }

    /// The padded grid underneath.
    #[inline]
    #[must_use]
    pub const fn padded(&self) -> &'a PaddedGrid {
        self.grid
    }
}
