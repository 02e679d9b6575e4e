//! # VOXMESH Core
//!
//! Support primitives for the voxel mesher:
//! - Pooled scratch buffers with scoped acquire/release
//! - Row-major 3D shapes
//! - Elementwise copy/map over rectangular 3D regions
//!
//! ## Architecture Rules
//!
//! 1. **Scratch memory is scoped** - a [`ScratchBuffer`] returns to its pool when dropped
//! 2. **Row-major everywhere** - the last axis is the fastest-varying one
//! 3. **No per-element bounds checks in the hot path** - regions are validated once
//!
//! ## Example
//!
//! ```rust,ignore
//! use voxmesh_core::ScratchPool;
//!
//! let pool: ScratchPool<u32> = ScratchPool::new(8);
//! {
//!     let mut field = pool.acquire(4096); // zero-filled
//!     field[0] = 7;
//! } // released here, even on early return
//! assert_eq!(pool.stats().outstanding, 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;
pub mod ops;
pub mod shape;

pub use memory::{PoolStats, ScratchBuffer, ScratchPool};
pub use ops::{copy_region, map_region, visit_region_mut};
pub use shape::RowMajorShape;
