//! Surface variants.
//!
//! All variants share padding, slicing and merging. They differ in how a
//! lattice cell becomes a descriptor and how a merged rectangle becomes
//! vertices.
//!
//! | Variant              | Axes  | Margin | Palette | Colors           |
//! |----------------------|-------|--------|---------|------------------|
//! | [`PlainSurface`]     | all   | 0      | yes     | rgb + 255        |
//! | [`AoSurface`]        | all   | 1      | yes     | rgb + brightness |
//! | [`WalkableSurface`]  | Y     | 0      | no      | none             |

use crate::config::ShadingConfig;
use crate::mesh::axis::{Axis, AxisRoles};
use crate::mesh::buffers::MeshBuilder;
use crate::mesh::descriptor::FaceDescriptor;
use crate::mesh::emitter::{self, CornerShade, Diagonal, SliceQuad};
use crate::mesh::stencil::{self, Neighborhood};
use crate::voxel::palette::{Palette, MAX_PALETTE_INDEX};

const FULL_BRIGHT: CornerShade = [[u8::MAX; 2]; 2];

/// Read-only state available while emitting quads.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Palette of the current build.
    pub palette: &'a Palette,
    /// Shading table.
    pub shading: &'a ShadingConfig,
}

/// The per-variant half of the mesher.
pub trait SurfaceStrategy {
    /// Name used in logs.
    const NAME: &'static str;

    /// Hidden padding cells the stencil reads past the high shell.
    const MARGIN: u32;

    /// Whether voxel values are replaced by palette indices before evaluation.
    const USES_PALETTE: bool;

    /// Whether the output carries a color stream.
    const EMITS_COLOR: bool;

    /// Axes this variant produces faces on.
    fn axes(&self) -> &'static [Axis];

    /// Descriptor for one lattice cell, or `None` if there is no face.
    fn evaluate(&self, hood: &Neighborhood<'_>) -> Option<FaceDescriptor>;

    /// Writes the vertices of one merged rectangle.
    fn emit_quad(
        &self,
        quad: &SliceQuad,
        face: FaceDescriptor,
        roles: AxisRoles,
        ctx: &EmitContext<'_>,
        out: &mut MeshBuilder,
    );
}

/// Flat-colored faces, no occlusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSurface;

impl SurfaceStrategy for PlainSurface {
    const NAME: &'static str = "plain";
    const MARGIN: u32 = 0;
    const USES_PALETTE: bool = true;
    const EMITS_COLOR: bool = true;

    fn axes(&self) -> &'static [Axis] {
        &Axis::ALL
    }

    #[inline]
    fn evaluate(&self, hood: &Neighborhood<'_>) -> Option<FaceDescriptor> {
        let (index, flip) = stencil::boundary(hood.near(), hood.far())?;
        Some(FaceDescriptor::unshaded(palette_index(index), flip))
    }

    fn emit_quad(
        &self,
        quad: &SliceQuad,
        face: FaceDescriptor,
        roles: AxisRoles,
        ctx: &EmitContext<'_>,
        out: &mut MeshBuilder,
    ) {
        emitter::write_quad(
            out,
            quad,
            roles,
            face.flip,
            ctx.palette.rgb(face.palette_index).to_array(),
            &FULL_BRIGHT,
            emitter::vertex_order(Diagonal::Primary, face.flip),
        );
    }
}

/// Faces with per-corner ambient occlusion baked into the color alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct AoSurface;

impl SurfaceStrategy for AoSurface {
    const NAME: &'static str = "ambient_occlusion";
    const MARGIN: u32 = 1;
    const USES_PALETTE: bool = true;
    const EMITS_COLOR: bool = true;

    fn axes(&self) -> &'static [Axis] {
        &Axis::ALL
    }

    #[inline]
    fn evaluate(&self, hood: &Neighborhood<'_>) -> Option<FaceDescriptor> {
        let (index, flip) = stencil::boundary(hood.near(), hood.far())?;
        Some(FaceDescriptor {
            palette_index: palette_index(index),
            flip,
            corner_ao: stencil::corner_ao(hood, flip),
        })
    }

    fn emit_quad(
        &self,
        quad: &SliceQuad,
        face: FaceDescriptor,
        roles: AxisRoles,
        ctx: &EmitContext<'_>,
        out: &mut MeshBuilder,
    ) {
        let shade = emitter::corner_shade(face.corner_ao, ctx.shading);
        let diagonal = emitter::choose_diagonal(&shade);
        emitter::write_quad(
            out,
            quad,
            roles,
            face.flip,
            ctx.palette.rgb(face.palette_index).to_array(),
            &shade,
            emitter::vertex_order(diagonal, face.flip),
        );
    }
}

/// Upward-facing floor surfaces for navigation meshes.
///
/// Only faces on the Y axis whose solid cell is below. Colors are ignored,
/// so every floor merges with every coplanar neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkableSurface;

impl WalkableSurface {
    /// Descriptor shared by every floor face.
    pub const FLOOR: FaceDescriptor = FaceDescriptor::unshaded(1, false);
}

impl SurfaceStrategy for WalkableSurface {
    const NAME: &'static str = "walkable";
    const MARGIN: u32 = 0;
    const USES_PALETTE: bool = false;
    const EMITS_COLOR: bool = false;

    fn axes(&self) -> &'static [Axis] {
        &[Axis::Y]
    }

    #[inline]
    fn evaluate(&self, hood: &Neighborhood<'_>) -> Option<FaceDescriptor> {
        (hood.near() != 0 && hood.far() == 0).then_some(Self::FLOOR)
    }

    fn emit_quad(
        &self,
        quad: &SliceQuad,
        face: FaceDescriptor,
        roles: AxisRoles,
        _ctx: &EmitContext<'_>,
        out: &mut MeshBuilder,
    ) {
        emitter::write_quad(
            out,
            quad,
            roles,
            face.flip,
            [0; 3],
            &FULL_BRIGHT,
            emitter::vertex_order(Diagonal::Secondary, face.flip),
        );
    }
}

/// Palette index carried by a remapped cell value.
#[inline]
fn palette_index(value: u32) -> u16 {
    (value & u32::from(MAX_PALETTE_INDEX)) as u16
}
