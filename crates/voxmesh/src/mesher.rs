//! Build pipeline.
//!
//! ```text
//! grid ─pad─► PaddedGrid ─palette─► indices ─stencil─► 3 descriptor fields
//!                                                         │
//!        Mesh ◄─emit─ rectangles ◄─merge─ slices ◄────────┘
//! ```
//!
//! A [`Mesher`] owns a scratch pool for the descriptor fields, so repeated
//! builds of similar grids stop allocating after the first one.

use std::time::Instant;

use voxmesh_core::{PoolStats, ScratchBuffer, ScratchPool};

use crate::config::{MeshOptions, MesherConfig, SurfaceVariant};
use crate::error::MeshResult;
use crate::mesh::axis::Axis;
use crate::mesh::buffers::{Mesh, MeshBuilder};
use crate::mesh::descriptor::{FaceDescriptor, PackedDescriptor};
use crate::mesh::greedy::GreedyMerger;
use crate::mesh::slice;
use crate::mesh::stencil;
use crate::mesh::strategy::{AoSurface, EmitContext, PlainSurface, SurfaceStrategy, WalkableSurface};
use crate::voxel::grid::VoxelGrid;
use crate::voxel::padding::{Lattice, PaddedGrid};
use crate::voxel::palette::Palette;

/// Builds slower than this are logged as warnings.
const SLOW_BUILD_MS: u128 = 50;

/// Field buffers kept for reuse: one per axis, two builds deep.
const POOL_RETAINED: usize = 6;

/// Descriptor field of one axis, decoded for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceField {
    /// Axis the faces lie on.
    pub axis: Axis,
    /// Lattice shape the field is indexed by.
    pub shape: [u32; 3],
    /// Packed descriptor per lattice cell.
    pub cells: Vec<PackedDescriptor>,
}

impl SurfaceField {
    /// Number of lattice cells carrying a face.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Decoded descriptor at a lattice cell.
    #[must_use]
    pub fn get(&self, [x, y, z]: [u32; 3]) -> Option<FaceDescriptor> {
        let [_, ny, nz] = self.shape;
        if x >= self.shape[0] || y >= ny || z >= nz {
            return None;
        }
        let idx = ((x as usize * ny as usize) + y as usize) * nz as usize + z as usize;
        self.cells[idx].unpack()
    }
}

/// Surface mesher for one variant.
///
/// # Example
///
/// ```rust,ignore
/// use voxmesh::{AoSurface, Mesher, MesherConfig, VoxelGrid};
///
/// let grid = VoxelGrid::filled([4, 4, 4], 0x808080)?;
/// let mesher: Mesher<AoSurface> = Mesher::new(MesherConfig::closed());
/// let mesh = mesher.mesh(&grid)?;
/// assert_eq!(mesh.quad_count(), 6);
/// ```
pub struct Mesher<S: SurfaceStrategy> {
    strategy: S,
    config: MesherConfig,
    /// Scratch storage for descriptor fields.
    pool: ScratchPool<PackedDescriptor>,
}

impl<S: SurfaceStrategy + Default> Mesher<S> {
    /// Creates a mesher with the variant's default strategy.
    #[must_use]
    pub fn new(config: MesherConfig) -> Self {
        Self::with_strategy(S::default(), config)
    }
}

impl<S: SurfaceStrategy> Mesher<S> {
    /// Creates a mesher around a strategy value.
    #[must_use]
    pub fn with_strategy(strategy: S, config: MesherConfig) -> Self {
        Self {
            strategy,
            config,
            pool: ScratchPool::new(POOL_RETAINED),
        }
    }

    /// Build configuration.
    #[must_use]
    pub const fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// Scratch pool counters.
    #[must_use]
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Pads a grid with the margin this variant's stencil needs.
    #[must_use]
    pub fn pad(&self, grid: &VoxelGrid) -> PaddedGrid {
        PaddedGrid::new(grid, S::MARGIN)
    }

    /// Pads a grid, mapping every value on the way in.
    #[must_use]
    pub fn pad_with<F>(&self, grid: &VoxelGrid, mapper: F) -> PaddedGrid
    where
        F: FnMut(u32) -> u32,
    {
        PaddedGrid::with_mapper(grid, S::MARGIN, mapper)
    }

    /// Pads and meshes a grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeshError::PaletteOverflow`] if the grid has too many
    /// distinct colors for a shaded variant.
    pub fn mesh(&self, grid: &VoxelGrid) -> MeshResult<Mesh> {
        self.build(self.pad(grid))
    }

    /// Meshes an already padded grid, for example one with a filled border.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeshError::PaletteOverflow`] if the grid has too many
    /// distinct colors for a shaded variant. Nothing is emitted in that case.
    pub fn build(&self, mut padded: PaddedGrid) -> MeshResult<Mesh> {
        let start = Instant::now();
        let shape = padded.shape();

        tracing::debug!(
            "[MESH START] {} surface, padded shape {:?}, open_end={}",
            S::NAME,
            shape,
            self.config.open_end
        );

        if padded.backing().iter().all(|&v| v == 0) {
            tracing::debug!("[MESH] padded grid {:?} is empty - skipping", shape);
            return Ok(MeshBuilder::new(S::EMITS_COLOR).finish(Palette::new()));
        }

        let palette = self.prepare(&mut padded)?;
        let lattice = padded.unpad(self.config.trim());
        let fields = self.evaluate_fields(&lattice);

        let ctx = EmitContext {
            palette: &palette,
            shading: &self.config.shading,
        };
        let mut out = MeshBuilder::new(S::EMITS_COLOR);
        let mut merger = GreedyMerger::new();
        let mut quads = 0;

        for (&axis, field) in self.strategy.axes().iter().zip(&fields) {
            let axis_quads = slice::mesh_axis(
                &self.strategy,
                axis,
                field,
                lattice.shape(),
                self.config.planar_offset(),
                &mut merger,
                &ctx,
                &mut out,
            );
            tracing::debug!("[MESH] axis {:?}: {} quads", axis, axis_quads);
            quads += axis_quads;
        }
        drop(fields);

        let elapsed = start.elapsed();
        tracing::debug!(
            "[MESH END] {} surface in {}us: {} quads, {} vertices, {} palette entries",
            S::NAME,
            elapsed.as_micros(),
            quads,
            out.vertex_count(),
            palette.len()
        );
        if quads == 0 {
            tracing::warn!(
                "[MESH WARN] non-empty padded grid {:?} produced no {} faces",
                shape,
                S::NAME
            );
        }
        if elapsed.as_millis() > SLOW_BUILD_MS {
            tracing::warn!(
                "[MESH WARN] slow mesh generation: {}ms for padded shape {:?}",
                elapsed.as_millis(),
                shape
            );
        }

        Ok(out.finish(palette))
    }

    /// Runs palette extraction and the stencil only, returning the decoded
    /// descriptor fields of every meshed axis.
    ///
    /// # Errors
    ///
    /// Same as [`Mesher::build`].
    pub fn surface_fields(&self, mut padded: PaddedGrid) -> MeshResult<(Palette, Vec<SurfaceField>)> {
        let palette = self.prepare(&mut padded)?;
        let lattice = padded.unpad(self.config.trim());
        let shape = lattice.shape().dims();

        let fields = self
            .strategy
            .axes()
            .iter()
            .zip(self.evaluate_fields(&lattice))
            .map(|(&axis, field)| SurfaceField {
                axis,
                shape,
                cells: field.to_vec(),
            })
            .collect();

        Ok((palette, fields))
    }

    /// Widens the margin if needed and remaps colors to palette indices.
    fn prepare(&self, padded: &mut PaddedGrid) -> MeshResult<Palette> {
        padded.ensure_margin(S::MARGIN);
        if S::USES_PALETTE {
            padded.remap_to_palette()
        } else {
            Ok(Palette::new())
        }
    }

    /// One pooled descriptor field per meshed axis.
    fn evaluate_fields(&self, lattice: &Lattice<'_>) -> Vec<ScratchBuffer<'_, PackedDescriptor>> {
        let size = lattice.shape().size();
        self.strategy
            .axes()
            .iter()
            .map(|&axis| {
                let mut field = self.pool.acquire(size);
                stencil::evaluate_field(&self.strategy, lattice, axis, &mut field);
                field
            })
            .collect()
    }
}

/// One-shot build with a variant chosen at runtime.
///
/// # Errors
///
/// Returns [`crate::MeshError::PaletteOverflow`] if the grid has too many
/// distinct colors for a shaded variant.
pub fn build(grid: &VoxelGrid, options: &MeshOptions) -> MeshResult<Mesh> {
    match options.variant {
        SurfaceVariant::Plain => Mesher::<PlainSurface>::new(options.config).mesh(grid),
        SurfaceVariant::AmbientOcclusion => Mesher::<AoSurface>::new(options.config).mesh(grid),
        SurfaceVariant::Walkable => Mesher::<WalkableSurface>::new(options.config).mesh(grid),
    }
}
