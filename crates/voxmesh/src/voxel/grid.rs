//! Dense voxel grid.
//!
//! A grid is a flat row-major buffer of `u32` values plus its shape. Value 0
//! is empty; any other value is solid and usually carries a packed 24-bit
//! `0xRRGGBB` color.

use voxmesh_core::RowMajorShape;

use crate::error::{MeshError, MeshResult};

/// Value of an empty cell.
pub const EMPTY: u32 = 0;

/// Largest backing volume the mesher can address (coordinates are 32-bit).
pub const MAX_BACKING_CELLS: usize = u32::MAX as usize;

/// Cells added per axis by padding: one border cell on each side plus the
/// deepest hidden margin any surface variant asks for.
const MAX_PADDING: usize = 3;

/// A dense 3D grid of voxel values.
///
/// Memory layout is row-major: `voxels[(x * ny + y) * nz + z]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Shape in (x, y, z) order.
    shape: RowMajorShape,
    /// Voxel data.
    voxels: Vec<u32>,
}

impl VoxelGrid {
    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidShape`] if any dimension is zero
    /// - [`MeshError::GridTooLarge`] if the padded grid would not be addressable
    /// - [`MeshError::LengthMismatch`] if `voxels.len() != nx * ny * nz`
    pub fn new(shape: [usize; 3], voxels: Vec<u32>) -> MeshResult<Self> {
        let dims = validate_shape(shape)?;
        let expected = shape[0] * shape[1] * shape[2];
        if voxels.len() != expected {
            return Err(MeshError::LengthMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self {
            shape: RowMajorShape::new(dims),
            voxels,
        })
    }

    /// Creates a grid with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Same shape errors as [`VoxelGrid::new`].
    pub fn filled(shape: [usize; 3], value: u32) -> MeshResult<Self> {
        let dims = validate_shape(shape)?;
        let shape = RowMajorShape::new(dims);
        let voxels = vec![value; shape.size()];
        Ok(Self { shape, voxels })
    }

    /// Creates an all-empty grid.
    ///
    /// # Errors
    ///
    /// Same shape errors as [`VoxelGrid::new`].
    pub fn empty(shape: [usize; 3]) -> MeshResult<Self> {
        Self::filled(shape, EMPTY)
    }

    /// Creates a grid by evaluating `f` at every cell, in row-major order.
    ///
    /// # Errors
    ///
    /// Same shape errors as [`VoxelGrid::new`].
    pub fn from_fn<F>(shape: [usize; 3], mut f: F) -> MeshResult<Self>
    where
        F: FnMut([u32; 3]) -> u32,
    {
        let dims = validate_shape(shape)?;
        let shape = RowMajorShape::new(dims);
        let voxels = (0..shape.size()).map(|i| f(shape.delinearize(i))).collect();
        Ok(Self { shape, voxels })
    }

    /// Shape in (x, y, z) order.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.shape.dims().map(|d| d as usize)
    }

    /// The row-major shape used for indexing.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &RowMajorShape {
        &self.shape
    }

    /// Returns the value at a cell, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<u32> {
        let p = [x, y, z];
        self.shape
            .contains(p)
            .then(|| self.voxels[self.shape.linearize(p)])
    }

    /// Sets a cell. Writes outside the grid are ignored.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: u32) {
        let p = [x, y, z];
        if self.shape.contains(p) {
            let idx = self.shape.linearize(p);
            self.voxels[idx] = value;
        }
    }

    /// Raw voxel data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.voxels
    }

    /// Number of solid cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Returns true if every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(|&v| v == EMPTY)
    }
}

/// Rejects zero dimensions and grids whose padded backing would overflow
/// 32-bit addressing. Runs before anything is allocated.
fn validate_shape(shape: [usize; 3]) -> MeshResult<[u32; 3]> {
    if shape.iter().any(|&d| d == 0) {
        return Err(MeshError::InvalidShape { shape });
    }

    let backing = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d.checked_add(MAX_PADDING)?));
    match backing {
        Some(cells) if cells <= MAX_BACKING_CELLS => {}
        _ => {
            return Err(MeshError::GridTooLarge {
                shape,
                max_cells: MAX_BACKING_CELLS,
            })
        }
    }

    // Every dimension fits in u32 once the backing volume does.
    Ok(shape.map(|d| d as u32))
}
