//! Walks a plane row by row, sending interior pixels through a kernel and
//! border pixels through the border policy.

mod rust;
#[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))]
mod sse;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    kernel::Kernel, neighborhood::Footprint, params::BorderPolicy, simd::SimdTier, util::Pixel,
};

/// Filters a whole plane: `dest`, `dest_pitch`, `src`, `src_pitch`, `width`,
/// `height`, `peak`, `border`. Pitches are counted in samples.
pub type PlaneFn<T> = fn(
    &mut [T],
    NonZeroUsize,
    &[T],
    NonZeroUsize,
    NonZeroUsize,
    NonZeroUsize,
    T,
    BorderPolicy,
);

/// Picks the plane function for `K` on samples `T` at the given tier.
///
/// Tiers the running CPU does not support are lowered to one it does.
#[must_use]
pub fn plane_fn<T: Pixel, K: Kernel>(tier: SimdTier) -> PlaneFn<T> {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            match tier.min(SimdTier::detect()) {
                SimdTier::Sse41 => return process_plane_sse41::<T, K>,
                SimdTier::Sse2 => return sse::process_plane_sse2::<T, K>,
                SimdTier::Scalar => {}
            }
        } else {
            let _ = tier;
        }
    }

    rust::process_plane::<T, K>
}

#[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))]
fn process_plane_sse41<T: Pixel, K: Kernel>(
    dest: &mut [T],
    dest_pitch: NonZeroUsize,
    src: &[T],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: T,
    border: BorderPolicy,
) {
    // SAFETY: `plane_fn` only hands this out after detecting SSE4.1
    unsafe {
        sse::process_plane_sse41::<T, K>(
            dest, dest_pitch, src, src_pitch, width, height, peak, border,
        );
    }
}

/// Runs `interior` on every row that has interior pixels, passing the
/// destination row and its index. `interior` must write the columns
/// `REACH_X..width - REACH_X`; everything else is written here.
#[inline(always)]
fn process_rows<T: Pixel, K: Kernel>(
    dest: &mut [T],
    dest_pitch: usize,
    src: &[T],
    src_pitch: usize,
    width: usize,
    height: usize,
    peak: T,
    border: BorderPolicy,
    interior: impl Fn(&mut [T], usize) + Sync,
) {
    // Checked once here so the row code can index through raw pointers
    assert!(src_pitch >= width && dest_pitch >= width);
    assert!(src.len() >= (height - 1) * src_pitch + width);
    assert!(dest.len() >= (height - 1) * dest_pitch + width);

    let reach_x = <K::Footprint as Footprint>::REACH_X;
    let reach_y = <K::Footprint as Footprint>::REACH_Y;
    let has_interior_columns = width > 2 * reach_x;

    let row = |(y, dest_row): (usize, &mut [T])| {
        let dest_row = &mut dest_row[..width];
        let border_pixels = |dest_row: &mut [T], columns| {
            rust::border_pixels::<T, K>(
                dest_row, src, src_pitch, width, height, y, columns, peak, border,
            );
        };

        if !has_interior_columns || y < reach_y || y + reach_y >= height {
            border_pixels(dest_row, 0..width);
        } else {
            border_pixels(dest_row, 0..reach_x);
            interior(dest_row, y);
            border_pixels(dest_row, width - reach_x..width);
        }
    };

    cfg_if! {
        if #[cfg(feature = "rayon")] {
            dest.par_chunks_mut(dest_pitch)
                .take(height)
                .enumerate()
                .for_each(row);
        } else {
            dest.chunks_mut(dest_pitch)
                .take(height)
                .enumerate()
                .for_each(row);
        }
    }
}
