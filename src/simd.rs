//! Fixed-width vector primitives shared by all vectorized kernels.
//!
//! Every kernel is written once against [`SimdVector`] and monomorphized for
//! each sample type and instruction-set tier.

#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(test)]
mod tests;

use cfg_if::cfg_if;

#[cfg(target_arch = "x86_64")]
pub use sse::{F32x4, Isa, Sse2, Sse41, U8x16, U16x8};

use crate::util::Pixel;

/// Instruction-set level a plane function is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdTier {
    /// Portable reference path, one sample at a time.
    Scalar,
    /// x86_64 baseline. 16-bit unsigned min/max are emulated.
    Sse2,
    /// `lddqu` loads, native 16-bit unsigned min/max and variable blends.
    Sse41,
}

impl SimdTier {
    /// The best tier the running CPU supports.
    #[must_use]
    pub fn detect() -> Self {
        cfg_if! {
            if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
                let best = if crate::util::has_sse41() {
                    Self::Sse41
                } else {
                    Self::Sse2
                };
            } else {
                let best = Self::Scalar;
            }
        }
        best
    }

    /// Every tier the running CPU supports, lowest first.
    #[must_use]
    pub fn available() -> Vec<Self> {
        let best = Self::detect();
        [Self::Scalar, Self::Sse2, Self::Sse41]
            .into_iter()
            .filter(|tier| *tier <= best)
            .collect()
    }

    /// Lowers `requested` to what the CPU supports. `None` picks the best tier.
    #[must_use]
    pub fn resolve(requested: Option<Self>) -> Self {
        let best = Self::detect();
        match requested {
            Some(tier) if tier > best => {
                log::debug!("{tier:?} is not supported on this CPU, falling back to {best:?}");
                best
            }
            Some(tier) => tier,
            None => best,
        }
    }
}

/// A 128-bit vector of samples.
///
/// Integer lanes are unsigned and their `adds`/`subs` saturate. Float lanes
/// never saturate. Values of an implementing type only exist inside code that
/// runs on a CPU supporting its tier, so the operations are `unsafe` only
/// because of the raw intrinsics underneath.
pub trait SimdVector: Copy {
    type Sample: Pixel;

    /// Number of samples in one vector.
    const LANES: usize;

    /// # Safety
    /// `ptr` must be valid for reading `LANES` samples.
    unsafe fn load(ptr: *const Self::Sample) -> Self;

    /// # Safety
    /// `ptr` must be valid for reading `LANES` samples and 16-byte aligned.
    unsafe fn load_aligned(ptr: *const Self::Sample) -> Self;

    /// # Safety
    /// `ptr` must be valid for writing `LANES` samples.
    unsafe fn store(self, ptr: *mut Self::Sample);

    unsafe fn splat(value: Self::Sample) -> Self;

    unsafe fn min(self, other: Self) -> Self;

    unsafe fn max(self, other: Self) -> Self;

    unsafe fn adds(self, other: Self) -> Self;

    unsafe fn subs(self, other: Self) -> Self;

    unsafe fn abs_diff(self, other: Self) -> Self;

    /// Midpoint, rounded up for integer lanes.
    unsafe fn avg(self, other: Self) -> Self;

    /// All bits set in lanes where `self == other`.
    unsafe fn eq_mask(self, other: Self) -> Self;

    /// `mask ? desired : otherwise`, lane by lane.
    unsafe fn blend(mask: Self, desired: Self, otherwise: Self) -> Self;

    #[inline(always)]
    unsafe fn clip(self, minimum: Self, maximum: Self) -> Self {
        self.min(maximum).max(minimum)
    }

    /// Continues the step from `from` to `self` by one more step, saturating
    /// to `[0, peak]` for integer lanes.
    #[inline(always)]
    unsafe fn extrapolate(self, from: Self, peak: Self) -> Self {
        self.adds(self.subs(from)).subs(from.subs(self)).min(peak)
    }

    /// Returns `(min, max)` of the pair.
    #[inline(always)]
    unsafe fn sort_pair(a: Self, b: Self) -> (Self, Self) {
        (a.min(b), a.max(b))
    }

    /// Picks `desired` in lanes where `cmp1 == cmp2`, `current` elsewhere.
    #[inline(always)]
    unsafe fn select_on_equal(cmp1: Self, cmp2: Self, current: Self, desired: Self) -> Self {
        Self::blend(cmp1.eq_mask(cmp2), desired, current)
    }
}
