//! Surface extraction: stencils, slice merging and quad emission.

pub mod axis;
pub mod buffers;
pub mod descriptor;
pub mod emitter;
pub mod greedy;
pub mod slice;
pub mod stencil;
pub mod strategy;

pub use axis::{Axis, AxisRoles};
pub use buffers::{Mesh, MeshBuilder, MeshVertex, VERTICES_PER_QUAD};
pub use descriptor::{FaceDescriptor, PackedDescriptor, AO_OPEN};
pub use emitter::{Diagonal, SliceQuad};
pub use greedy::{GreedyMerger, MergedRect};
pub use stencil::{vertex_ao, Neighborhood};
pub use strategy::{AoSurface, EmitContext, PlainSurface, SurfaceStrategy, WalkableSurface};
