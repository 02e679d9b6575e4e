//! Row-major 3D shapes.
//!
//! `ndshape` linearizes with the FIRST coordinate fastest. Voxel grids here
//! are row-major (last coordinate fastest), so the wrapper hands ndshape the
//! axes in reverse.

use ndshape::{RuntimeShape, Shape};

/// A 3D shape with row-major linearization: `index = (x * ny + y) * nz + z`.
pub struct RowMajorShape {
    /// Dimensions in (x, y, z) order.
    dims: [u32; 3],
    /// ndshape over (z, y, x).
    inner: RuntimeShape<u32, 3>,
}

impl RowMajorShape {
    /// Creates a shape from (x, y, z) dimensions.
    #[must_use]
    pub fn new(dims: [u32; 3]) -> Self {
        Self {
            dims,
            inner: RuntimeShape::<u32, 3>::new([dims[2], dims[1], dims[0]]),
        }
    }

    /// Dimensions in (x, y, z) order.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> [u32; 3] {
        self.dims
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.size() as usize
    }

    /// Element strides in (x, y, z) order.
    #[inline]
    #[must_use]
    pub const fn strides(&self) -> [usize; 3] {
        let [_, ny, nz] = self.dims;
        [ny as usize * nz as usize, nz as usize, 1]
    }

    /// Flat index of a cell.
    #[inline]
    #[must_use]
    pub fn linearize(&self, [x, y, z]: [u32; 3]) -> usize {
        self.inner.linearize([z, y, x]) as usize
    }

    /// Cell coordinates of a flat index.
    #[inline]
    #[must_use]
    pub fn delinearize(&self, index: usize) -> [u32; 3] {
        let [z, y, x] = self.inner.delinearize(index as u32);
        [x, y, z]
    }

    /// Returns true if the coordinate lies inside the shape.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: [u32; 3]) -> bool {
        p.iter().zip(self.dims.iter()).all(|(c, d)| c < d)
    }
}

impl Clone for RowMajorShape {
    fn clone(&self) -> Self {
        Self::new(self.dims)
    }
}

impl std::fmt::Debug for RowMajorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RowMajorShape").field(&self.dims).finish()
    }
}

impl PartialEq for RowMajorShape {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims
    }
}

impl Eq for RowMajorShape {}
