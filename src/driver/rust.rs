use std::{num::NonZeroUsize, ops::Range};

use crate::{kernel::Kernel, neighborhood::Footprint, params::BorderPolicy, util::Pixel};

pub(super) fn process_plane<T: Pixel, K: Kernel>(
    dest: &mut [T],
    dest_pitch: NonZeroUsize,
    src: &[T],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: T,
    border: BorderPolicy,
) {
    let src_pitch = src_pitch.get();
    let width = width.get();
    let height = height.get();
    let reach = <K::Footprint as Footprint>::REACH_X;

    super::process_rows::<T, K>(
        dest,
        dest_pitch.get(),
        src,
        src_pitch,
        width,
        height,
        peak,
        border,
        |dest_row, y| {
            filter_columns::<T, K>(
                dest_row,
                src,
                src_pitch,
                width,
                height,
                y,
                reach..width - reach,
                peak,
            );
        },
    );
}

/// Runs the scalar kernel on `columns` of row `y`.
pub(super) fn filter_columns<T: Pixel, K: Kernel>(
    dest_row: &mut [T],
    src: &[T],
    pitch: usize,
    width: usize,
    height: usize,
    y: usize,
    columns: Range<usize>,
    peak: T,
) {
    for x in columns {
        let window = <K::Footprint as Footprint>::gather(src, pitch, width, height, x, y);
        dest_row[x] = K::scalar(window, peak);
    }
}

/// Writes `columns` of row `y`, whose windows leave the plane.
pub(super) fn border_pixels<T: Pixel, K: Kernel>(
    dest_row: &mut [T],
    src: &[T],
    pitch: usize,
    width: usize,
    height: usize,
    y: usize,
    columns: Range<usize>,
    peak: T,
    border: BorderPolicy,
) {
    match border {
        BorderPolicy::Copy => {
            let src_row = &src[y * pitch..];
            dest_row[columns.clone()].copy_from_slice(&src_row[columns]);
        }
        BorderPolicy::Clamp => {
            filter_columns::<T, K>(dest_row, src, pitch, width, height, y, columns, peak);
        }
    }
}
