//! # Mesher Error Types
//!
//! Everything a build can fail with. All of these are detected before any
//! descriptor is packed or any vertex is written.

use thiserror::Error;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A grid dimension was zero.
    #[error("invalid grid shape {shape:?}: every dimension must be at least 1")]
    InvalidShape {
        /// The rejected shape.
        shape: [usize; 3],
    },

    /// The voxel buffer does not match the grid shape.
    #[error("voxel buffer length mismatch: shape needs {expected} cells, buffer has {actual}")]
    LengthMismatch {
        /// `nx * ny * nz`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// The padded grid would not fit the 32-bit coordinate space.
    #[error("grid shape {shape:?} is too large: padded volume exceeds {max_cells} cells")]
    GridTooLarge {
        /// The rejected shape.
        shape: [usize; 3],
        /// Largest addressable padded volume.
        max_cells: usize,
    },

    /// More distinct colors than the descriptor's palette index can address.
    #[error("palette overflow: more than {capacity} distinct voxel values")]
    PaletteOverflow {
        /// Number of nonzero palette entries available.
        capacity: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for mesher operations.
pub type MeshResult<T> = Result<T, MeshError>;
