use std::num::NonZeroUsize;

use crate::{
    kernel::Kernel,
    neighborhood::Footprint,
    params::BorderPolicy,
    simd::{SimdVector, Sse2, Sse41},
    util::Pixel,
};

pub(super) fn process_plane_sse2<T: Pixel, K: Kernel>(
    dest: &mut [T],
    dest_pitch: NonZeroUsize,
    src: &[T],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: T,
    border: BorderPolicy,
) {
    // SAFETY: SSE2 is part of the x86_64 baseline
    unsafe {
        process_plane::<T::Vector<Sse2>, K>(
            dest, dest_pitch, src, src_pitch, width, height, peak, border,
        );
    }
}

#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn process_plane_sse41<T: Pixel, K: Kernel>(
    dest: &mut [T],
    dest_pitch: NonZeroUsize,
    src: &[T],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: T,
    border: BorderPolicy,
) {
    process_plane::<T::Vector<Sse41>, K>(
        dest, dest_pitch, src, src_pitch, width, height, peak, border,
    );
}

#[inline(always)]
unsafe fn process_plane<V: SimdVector, K: Kernel>(
    dest: &mut [V::Sample],
    dest_pitch: NonZeroUsize,
    src: &[V::Sample],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: V::Sample,
    border: BorderPolicy,
) {
    let src_pitch = src_pitch.get();
    let width = width.get();
    let height = height.get();

    // Aligned loads need every row start on a 16-byte boundary
    let aligned = (src.as_ptr() as usize) % 16 == 0
        && (src_pitch * size_of::<V::Sample>()) % 16 == 0;

    super::process_rows::<V::Sample, K>(
        dest,
        dest_pitch.get(),
        src,
        src_pitch,
        width,
        height,
        peak,
        border,
        |dest_row, y| {
            // SAFETY: `process_rows` only calls this for rows and columns
            // whose windows are inside the plane, and checked the buffer sizes
            unsafe {
                filter_row::<V, K>(dest_row, src, src_pitch, width, height, y, peak, aligned);
            }
        },
    );
}

/// Filters the interior columns of row `y`, a vector at a time, and the
/// columns left over at the end of the row one sample at a time.
#[inline(always)]
unsafe fn filter_row<V: SimdVector, K: Kernel>(
    dest_row: &mut [V::Sample],
    src: &[V::Sample],
    pitch: usize,
    width: usize,
    height: usize,
    y: usize,
    peak: V::Sample,
    aligned: bool,
) {
    let reach = <K::Footprint as Footprint>::REACH_X;
    let end = width - reach;
    let center = src.as_ptr().add(y * pitch);
    let out = dest_row.as_mut_ptr();
    let peak_vector = V::splat(peak);

    let mut x = reach;
    if aligned && x + V::LANES <= end {
        // The first vector starts at `reach`, which is not on a vector
        // boundary, and the following ones continue from the next boundary.
        filter_vector::<V, K, false>(center, out, pitch, x, peak_vector);
        x = V::LANES;
        while x + V::LANES <= end {
            filter_vector::<V, K, true>(center, out, pitch, x, peak_vector);
            x += V::LANES;
        }
    } else {
        while x + V::LANES <= end {
            filter_vector::<V, K, false>(center, out, pitch, x, peak_vector);
            x += V::LANES;
        }
    }

    super::rust::filter_columns::<V::Sample, K>(
        dest_row,
        src,
        pitch,
        width,
        height,
        y,
        x..end,
        peak,
    );
}

#[inline(always)]
unsafe fn filter_vector<V: SimdVector, K: Kernel, const ALIGNED: bool>(
    center: *const V::Sample,
    out: *mut V::Sample,
    pitch: usize,
    x: usize,
    peak: V,
) {
    let window = <K::Footprint as Footprint>::load::<V, ALIGNED>(center.add(x), pitch);
    K::vector(window, peak).store(out.add(x));
}
