//! Face descriptors.
//!
//! Every lattice cell of every axis gets one 32-bit word describing the face
//! between its two cells, or 0 when there is none. Two cells merge into the
//! same rectangle only if their words are identical, so the word must carry
//! everything that affects output: color, facing and corner occlusion.
//!
//! Bit layout:
//!
//! ```text
//!  bits  0..15  palette index (15 bits)
//!  bits 16..17  AO level, corner 0
//!  bits 18..19  AO level, corner 1
//!  bits 20..21  AO level, corner 2
//!  bits 22..23  AO level, corner 3
//!  bit  24      flip (face points toward -d)
//! ```

use bytemuck::{Pod, Zeroable};

use crate::voxel::palette::MAX_PALETTE_INDEX;

const INDEX_MASK: u32 = MAX_PALETTE_INDEX as u32;
const AO_SHIFT: u32 = 16;
const AO_MASK: u32 = 0b11;
const FLIP_BIT: u32 = 1 << 24;

/// AO level of a fully unoccluded corner.
pub const AO_OPEN: u8 = 3;

/// Decoded face descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceDescriptor {
    /// Palette index of the solid cell. Never 0 for a real face.
    pub palette_index: u16,
    /// True when the solid cell is on the high side and the face points toward `-d`.
    pub flip: bool,
    /// AO level (0..=3) per corner, in `(0,0) (1,0) (1,1) (0,1)` order.
    pub corner_ao: [u8; 4],
}

impl FaceDescriptor {
    /// A face with no occlusion.
    #[inline]
    #[must_use]
    pub const fn unshaded(palette_index: u16, flip: bool) -> Self {
        Self {
            palette_index,
            flip,
            corner_ao: [AO_OPEN; 4],
        }
    }

    /// Packs into a descriptor word.
    #[inline]
    #[must_use]
    pub fn pack(self) -> PackedDescriptor {
        let mut word = u32::from(self.palette_index) & INDEX_MASK;
        for (corner, &level) in self.corner_ao.iter().enumerate() {
            word |= (u32::from(level) & AO_MASK) << (AO_SHIFT + 2 * corner as u32);
        }
        if self.flip {
            word |= FLIP_BIT;
        }
        PackedDescriptor(word)
    }
}

/// A packed descriptor word. Zero means "no face".
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct PackedDescriptor(pub u32);

impl PackedDescriptor {
    /// No face.
    pub const EMPTY: Self = Self(0);

    /// Returns true if there is no face here.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Decodes the word, or `None` for an empty cell.
    #[inline]
    #[must_use]
    pub fn unpack(self) -> Option<FaceDescriptor> {
        if self.is_empty() {
            return None;
        }
        let word = self.0;
        let level = |corner: u32| ((word >> (AO_SHIFT + 2 * corner)) & AO_MASK) as u8;
        Some(FaceDescriptor {
            palette_index: (word & INDEX_MASK) as u16,
            flip: word & FLIP_BIT != 0,
            corner_ao: [level(0), level(1), level(2), level(3)],
        })
    }
}
