//! Elementwise transforms over rectangular 3D regions of row-major buffers.
//!
//! Each region is walked as contiguous runs along the fastest axis, so the
//! inner loop is a plain slice zip.

use crate::shape::RowMajorShape;

/// Copies all of `src` into `dest` with its origin at `dest_origin`.
///
/// # Panics
///
/// Panics if the source does not fit inside the destination at that origin.
pub fn copy_region<T: Copy>(
    dest: &mut [T],
    dest_shape: &RowMajorShape,
    dest_origin: [u32; 3],
    src: &[T],
    src_shape: &RowMajorShape,
) {
    map_region(dest, dest_shape, dest_origin, src, src_shape, |v| v);
}

/// Writes `f(v)` for every element `v` of `src` into `dest`, offset by `dest_origin`.
///
/// # Panics
///
/// Panics if the source does not fit inside the destination at that origin.
pub fn map_region<T, U, F>(
    dest: &mut [U],
    dest_shape: &RowMajorShape,
    dest_origin: [u32; 3],
    src: &[T],
    src_shape: &RowMajorShape,
    mut f: F,
) where
    T: Copy,
    F: FnMut(T) -> U,
{
    let extent = src_shape.dims();
    let outer = dest_shape.dims();
    assert!(
        (0..3).all(|axis| dest_origin[axis] + extent[axis] <= outer[axis]),
        "region {extent:?} at {dest_origin:?} exceeds destination {outer:?}"
    );
    debug_assert_eq!(src.len(), src_shape.size());

    let run = extent[2] as usize;
    for x in 0..extent[0] {
        for y in 0..extent[1] {
            let s = src_shape.linearize([x, y, 0]);
            let d = dest_shape.linearize([dest_origin[0] + x, dest_origin[1] + y, dest_origin[2]]);
            for (out, &value) in dest[d..d + run].iter_mut().zip(&src[s..s + run]) {
                *out = f(value);
            }
        }
    }
}

/// Visits every cell of the box `[origin, origin + extent)` in row-major order.
///
/// The closure receives the cell coordinate (in `shape` space) and a mutable
/// reference to the element.
///
/// # Panics
///
/// Panics if the box does not fit inside `shape`.
pub fn visit_region_mut<T, F>(
    buf: &mut [T],
    shape: &RowMajorShape,
    origin: [u32; 3],
    extent: [u32; 3],
    mut f: F,
) where
    F: FnMut([u32; 3], &mut T),
{
    let outer = shape.dims();
    assert!(
        (0..3).all(|axis| origin[axis] + extent[axis] <= outer[axis]),
        "region {extent:?} at {origin:?} exceeds buffer {outer:?}"
    );

    for x in origin[0]..origin[0] + extent[0] {
        for y in origin[1]..origin[1] + extent[1] {
            let row = shape.linearize([x, y, origin[2]]);
            for (dz, cell) in buf[row..row + extent[2] as usize].iter_mut().enumerate() {
                f([x, y, origin[2] + dz as u32], cell);
            }
        }
    }
}
