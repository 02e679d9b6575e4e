//! Greedy rectangle merging over one 2D slice.
//!
//! Scans rows in order; inside a row, grows a run of identical descriptors
//! along the columns, then extends it down as many whole rows as match.
//! Claimed cells are cleared so each nonzero cell lands in exactly one
//! rectangle.

use crate::mesh::descriptor::PackedDescriptor;

/// A merged rectangle in slice coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRect {
    /// First row.
    pub row: u32,
    /// First column.
    pub col: u32,
    /// Rows covered (at least 1).
    pub height: u32,
    /// Columns covered (at least 1).
    pub width: u32,
}

/// Reusable mask for slice merging.
#[derive(Debug, Default)]
pub struct GreedyMerger {
    mask: Vec<PackedDescriptor>,
    rows: usize,
    cols: usize,
}

impl GreedyMerger {
    /// Creates an empty merger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `rows x cols` slice, reading each cell from `cell(row, col)`.
    pub fn load<F>(&mut self, rows: u32, cols: u32, mut cell: F)
    where
        F: FnMut(u32, u32) -> PackedDescriptor,
    {
        self.rows = rows as usize;
        self.cols = cols as usize;
        self.mask.clear();
        self.mask.reserve(self.rows * self.cols);
        for row in 0..rows {
            for col in 0..cols {
                self.mask.push(cell(row, col));
            }
        }
    }

    /// Partitions the nonzero cells into uniform rectangles.
    ///
    /// Rectangles come out in row-major order of their first cell. The mask
    /// is empty afterwards.
    pub fn merge<F>(&mut self, mut emit: F)
    where
        F: FnMut(MergedRect, PackedDescriptor),
    {
        let (rows, cols) = (self.rows, self.cols);

        for row in 0..rows {
            let mut col = 0;
            while col < cols {
                let face = self.mask[row * cols + col];

                if face.is_empty() {
                    col += 1;
                    continue;
                }

                // Find width - extend along the row while the word matches
                let mut width = 1;
                while col + width < cols && self.mask[row * cols + col + width] == face {
                    width += 1;
                }

                // Find height - extend while the whole run matches
                let mut height = 1;
                'height: while row + height < rows {
                    let start = (row + height) * cols + col;
                    for &other in &self.mask[start..start + width] {
                        if other != face {
                            break 'height;
                        }
                    }
                    height += 1;
                }

                // Clear used cells from mask
                for dr in 0..height {
                    let start = (row + dr) * cols + col;
                    for cell in &mut self.mask[start..start + width] {
                        debug_assert_eq!(*cell, face, "merged rectangle is not uniform");
                        *cell = PackedDescriptor::EMPTY;
                    }
                }

                emit(
                    MergedRect {
                        row: row as u32,
                        col: col as u32,
                        height: height as u32,
                        width: width as u32,
                    },
                    face,
                );

                col += width;
            }
        }

        debug_assert!(
            self.mask.iter().all(|c| c.is_empty()),
            "merge left unclaimed cells"
        );
    }
}
