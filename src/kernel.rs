//! Per-mode pixel formulas.
//!
//! Each kernel has a scalar form in [`rust`] and a vector form in [`simd`].
//! The two must agree bit for bit, NaN included, so both sort with
//! [`SORT8_NETWORK`] and compare in the same operand order.

mod rust;
mod simd;


use crate::{
    neighborhood::{Column3, Column5, Footprint, Neighborhood, Square, Vertical3, Vertical5},
    simd::SimdVector,
    util::Pixel,
};

/// Optimal 19-comparator sorting network for 8 inputs. Each pair `(i, j)`
/// leaves the minimum in `i` and the maximum in `j`.
const SORT8_NETWORK: [(usize, usize); 19] = [
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (2, 4),
    (3, 5),
    (1, 4),
    (3, 6),
    (1, 2),
    (3, 4),
    (5, 6),
];

/// The window type a kernel reads, holding samples or vectors `P`.
pub type Window<K, P> = <<K as Kernel>::Footprint as Footprint>::Window<P>;

/// A formula combining a window of samples into one output sample.
pub trait Kernel: Sized + Send + Sync + 'static {
    type Footprint: Footprint;

    /// `peak` is the largest valid sample for the bit depth.
    fn scalar<T: Pixel>(window: Window<Self, T>, peak: T) -> T;

    /// Lane-wise equivalent of [`Kernel::scalar`].
    ///
    /// # Safety
    /// The CPU must support the tier `V` is compiled for.
    unsafe fn vector<V: SimdVector>(window: Window<Self, V>, peak: V) -> V;
}

/// Clips the center between the pixels above and below it.
pub struct VerticalMedian;

/// Like [`VerticalMedian`], but widens the range by the values the vertical
/// trend from two rows away predicts.
pub struct RelaxedVerticalMedian;

/// Clips the center to the range between the `RANK`-th smallest and the
/// `RANK`-th largest of its 8 neighbors. `RANK` is 1 to 4.
pub struct RankClamp<const RANK: usize>;

/// Clips the center along each of the 4 lines through it and keeps the clip
/// that moved it least.
pub struct LineClip;

/// The average of the two middle values of the 8 neighbors, ignoring the
/// center.
pub struct NeighborMedian;

impl Kernel for VerticalMedian {
    type Footprint = Vertical3;

    #[inline(always)]
    fn scalar<T: Pixel>(window: Column3<T>, _peak: T) -> T {
        rust::vertical_median(window)
    }

    #[inline(always)]
    unsafe fn vector<V: SimdVector>(window: Column3<V>, _peak: V) -> V {
        simd::vertical_median(window)
    }
}

impl Kernel for RelaxedVerticalMedian {
    type Footprint = Vertical5;

    #[inline(always)]
    fn scalar<T: Pixel>(window: Column5<T>, peak: T) -> T {
        rust::relaxed_vertical_median(window, peak)
    }

    #[inline(always)]
    unsafe fn vector<V: SimdVector>(window: Column5<V>, peak: V) -> V {
        simd::relaxed_vertical_median(window, peak)
    }
}

impl<const RANK: usize> Kernel for RankClamp<RANK> {
    type Footprint = Square;

    #[inline(always)]
    fn scalar<T: Pixel>(window: Neighborhood<T>, _peak: T) -> T {
        rust::rank_clamp::<T, RANK>(window)
    }

    #[inline(always)]
    unsafe fn vector<V: SimdVector>(window: Neighborhood<V>, _peak: V) -> V {
        simd::rank_clamp::<V, RANK>(window)
    }
}

impl Kernel for LineClip {
    type Footprint = Square;

    #[inline(always)]
    fn scalar<T: Pixel>(window: Neighborhood<T>, _peak: T) -> T {
        rust::line_clip(window)
    }

    #[inline(always)]
    unsafe fn vector<V: SimdVector>(window: Neighborhood<V>, _peak: V) -> V {
        simd::line_clip(window)
    }
}

impl Kernel for NeighborMedian {
    type Footprint = Square;

    #[inline(always)]
    fn scalar<T: Pixel>(window: Neighborhood<T>, _peak: T) -> T {
        rust::neighbor_median(window)
    }

    #[inline(always)]
    unsafe fn vector<V: SimdVector>(window: Neighborhood<V>, _peak: V) -> V {
        simd::neighbor_median(window)
    }
}
