//! Per-build color palette.
//!
//! Each distinct nonzero voxel value gets a small index so that face
//! descriptors can carry it in 15 bits. Index 0 is always empty.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::error::{MeshError, MeshResult};

/// Largest palette index a face descriptor can carry.
pub const MAX_PALETTE_INDEX: u16 = 0x7FFF;

/// Nonzero palette entries available per build.
pub const PALETTE_CAPACITY: usize = MAX_PALETTE_INDEX as usize;

/// An 8-bit RGB triple, unpacked from a `0xRRGGBB` voxel value.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Creates a color.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpacks the low 24 bits of a voxel value. Bits above 24 are ignored.
    #[inline]
    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Packs into `0xRRGGBB`.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// The color as an array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Ordered list of distinct voxel values seen by one build.
///
/// Entry 0 is the empty value. Later entries appear in first-occurrence order
/// over the padded grid, so the same input always yields the same palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Raw voxel value per index.
    values: Vec<u32>,
    /// Unpacked colors, parallel to `values`.
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// A palette holding only the empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: vec![0],
            colors: vec![Rgb::default()],
        }
    }

    /// Builds a palette from values in first-occurrence order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PaletteOverflow`] if there are more than
    /// [`PALETTE_CAPACITY`] distinct nonzero values.
    pub fn extract<I>(values: I) -> MeshResult<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut builder = PaletteBuilder::new();
        for value in values {
            builder.add(value)?;
        }
        Ok(builder.build())
    }

    /// Number of entries, including the empty entry.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the palette holds no colors besides empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.len() <= 1
    }

    /// The raw voxel value stored at an index.
    #[inline]
    #[must_use]
    pub fn value(&self, index: u16) -> Option<u32> {
        self.values.get(usize::from(index)).copied()
    }

    /// The color stored at an index. Unknown indices read as black.
    #[inline]
    #[must_use]
    pub fn rgb(&self, index: u16) -> Rgb {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or_default()
    }

    /// Looks up the index of a raw voxel value.
    #[must_use]
    pub fn index_of(&self, value: u32) -> Option<u16> {
        self.values
            .iter()
            .position(|&v| v == value)
            .and_then(|i| u16::try_from(i).ok())
    }

    /// All raw values, index order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Colors as tightly packed RGB bytes, index order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Incremental palette construction with O(1) membership.
pub struct PaletteBuilder {
    /// Palette being built.
    palette: Palette,
    /// Value to index, for deduplication.
    reverse_map: HashMap<u32, u16>,
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteBuilder {
    /// Creates a builder holding only the empty entry.
    #[must_use]
    pub fn new() -> Self {
        let mut reverse_map = HashMap::new();
        reverse_map.insert(0, 0);

        Self {
            palette: Palette::new(),
            reverse_map,
        }
    }

    /// Adds a value, returning its index. Zero always maps to 0.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PaletteOverflow`] once the palette is full and
    /// a new value arrives.
    pub fn add(&mut self, value: u32) -> MeshResult<u16> {
        if let Some(&index) = self.reverse_map.get(&value) {
            return Ok(index);
        }

        let index = match u16::try_from(self.palette.values.len()) {
            Ok(i) if i <= MAX_PALETTE_INDEX => i,
            _ => {
                return Err(MeshError::PaletteOverflow {
                    capacity: PALETTE_CAPACITY,
                })
            }
        };

        self.palette.values.push(value);
        self.palette.colors.push(Rgb::from_packed(value));
        self.reverse_map.insert(value, index);
        Ok(index)
    }

    /// Returns the index of a value, if already added.
    #[must_use]
    pub fn get(&self, value: u32) -> Option<u16> {
        self.reverse_map.get(&value).copied()
    }

    /// Entries so far, including empty.
    #[must_use]
    pub fn count(&self) -> usize {
        self.palette.len()
    }

    /// Finishes the palette.
    #[must_use]
    pub fn build(self) -> Palette {
        self.palette
    }
}
