//! # VOXMESH
//!
//! Turns a dense grid of colored voxels into a triangle mesh of its
//! boundary surface:
//! - Only faces between a solid and an empty cell are emitted
//! - Coplanar faces with identical descriptors merge into maximal rectangles
//! - Per-corner ambient occlusion is baked into the vertex colors
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BUILD PIPELINE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  VoxelGrid → PaddedGrid → Palette → Stencil (3 fields)        │
//! │                                          ↓                    │
//! │                     Mesh ← Emitter ← Greedy merge per slice   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Deterministic: the same grid and config always produce the same bytes
//! - Every error is raised before a single vertex is written
//! - Scratch fields come from a pool and go back on every exit path

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod mesh;
pub mod mesher;
pub mod voxel;

pub use config::{MeshOptions, MesherConfig, ShadingConfig, SurfaceVariant, DEFAULT_AO_BRIGHTNESS};
pub use error::{MeshError, MeshResult};
pub use mesh::{
    AoSurface, Axis, FaceDescriptor, Mesh, MeshVertex, PackedDescriptor, PlainSurface,
    SurfaceStrategy, WalkableSurface,
};
pub use mesher::{build, Mesher, SurfaceField};
pub use voxel::{PaddedGrid, Palette, Rgb, VoxelGrid};
