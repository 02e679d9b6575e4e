//! Voxel data: the input grid, its padded copy, and the color palette.

pub mod grid;
pub mod padding;
pub mod palette;

pub use grid::{VoxelGrid, EMPTY, MAX_BACKING_CELLS};
pub use padding::{Lattice, PaddedGrid};
pub use palette::{Palette, PaletteBuilder, Rgb, MAX_PALETTE_INDEX, PALETTE_CAPACITY};
