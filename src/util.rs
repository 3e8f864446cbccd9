
mod plane;

pub use plane::{plane_bytes, plane_bytes_mut};

use std::{fmt::Debug, num::NonZeroUsize};

use vapoursynth::prelude::Component;

#[cfg(target_arch = "x86_64")]
use crate::simd::{F32x4, Isa, SimdVector, U8x16, U16x8};

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_sse41, "sse4.1");

#[cfg(target_arch = "x86_64")]
pub use cpuid_sse41::get as has_sse41;

/// A sample type the filters can process: `u8`, `u16` or `f32`.
///
/// The arithmetic here is the scalar reference that the vector kernels have
/// to reproduce lane by lane.
pub trait Pixel:
    Component + Copy + Clone + Debug + Default + PartialEq + PartialOrd + Send + Sync + 'static
{
    /// The 128-bit vector holding lanes of this sample type.
    #[cfg(target_arch = "x86_64")]
    type Vector<I: Isa>: SimdVector<Sample = Self>;

    /// Largest valid sample for the given bit depth.
    #[must_use]
    fn peak(bits: u8) -> Self;

    #[must_use]
    fn sample_min(self, other: Self) -> Self;

    #[must_use]
    fn sample_max(self, other: Self) -> Self;

    #[must_use]
    fn clip(self, minimum: Self, maximum: Self) -> Self {
        self.sample_min(maximum).sample_max(minimum)
    }

    /// Absolute difference.
    #[must_use]
    fn distance(self, other: Self) -> Self;

    /// Midpoint, rounded up for integers.
    #[must_use]
    fn average(self, other: Self) -> Self;

    /// Continues the step from `from` to `self` by one more step, saturating
    /// to `[0, peak]` for integers.
    #[must_use]
    fn extrapolate(self, from: Self, peak: Self) -> Self;
}

macro_rules! impl_integer_pixel {
    ($ty:ty, $vector:ident) => {
        impl Pixel for $ty {
            #[cfg(target_arch = "x86_64")]
            type Vector<I: Isa> = $vector<I>;

            fn peak(bits: u8) -> Self {
                debug_assert!(u32::from(bits) <= <$ty>::BITS);
                ((1u32 << bits) - 1) as $ty
            }

            fn sample_min(self, other: Self) -> Self {
                Ord::min(self, other)
            }

            fn sample_max(self, other: Self) -> Self {
                Ord::max(self, other)
            }

            fn distance(self, other: Self) -> Self {
                self.abs_diff(other)
            }

            fn average(self, other: Self) -> Self {
                ((u32::from(self) + u32::from(other) + 1) >> 1) as $ty
            }

            fn extrapolate(self, from: Self, peak: Self) -> Self {
                let value = 2 * i32::from(self) - i32::from(from);
                value.clamp(0, i32::from(peak)) as $ty
            }
        }
    };
}

impl_integer_pixel!(u8, U8x16);
impl_integer_pixel!(u16, U16x8);

impl Pixel for f32 {
    #[cfg(target_arch = "x86_64")]
    type Vector<I: Isa> = F32x4<I>;

    fn peak(_bits: u8) -> Self {
        f32::MAX
    }

    // Ordered the same way as `minps`/`maxps`, which return the second
    // operand unless the first one wins the comparison.
    fn sample_min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    fn sample_max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    fn distance(self, other: Self) -> Self {
        (self - other).abs()
    }

    fn average(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    fn extrapolate(self, from: Self, _peak: Self) -> Self {
        self + (self - from)
    }
}

/// Copies a `row_size` x `height` block between two buffers with their own strides.
///
/// Strides and `row_size` are counted in samples. Samples between `row_size`
/// and the stride are left untouched in the destination.
pub fn vs_bitblt<T: Pixel>(
    dest: &mut [T],
    dest_stride: NonZeroUsize,
    src: &[T],
    src_stride: NonZeroUsize,
    row_size: NonZeroUsize,
    height: NonZeroUsize,
) {
    let height = height.get();
    let row_size = row_size.get();
    let src_stride = src_stride.get();
    let dest_stride = dest_stride.get();

    if src_stride == dest_stride && src_stride == row_size {
        // Fast path: single copy when strides match row size
        dest[..row_size * height].copy_from_slice(&src[..row_size * height]);
    } else {
        // Copy row by row when strides differ
        for i in 0..height {
            let src_start = i * src_stride;
            let dest_start = i * dest_stride;
            dest[dest_start..dest_start + row_size]
                .copy_from_slice(&src[src_start..src_start + row_size]);
        }
    }
}
