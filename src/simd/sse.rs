use std::{arch::x86_64::*, marker::PhantomData};

use super::SimdVector;

/// Operations whose best encoding differs between instruction-set tiers.
///
/// Everything else is plain SSE2 and shared by both tiers.
pub trait Isa: Copy + Send + Sync + 'static {
    unsafe fn loadu_si128(ptr: *const __m128i) -> __m128i;

    unsafe fn min_epu16(a: __m128i, b: __m128i) -> __m128i;

    unsafe fn max_epu16(a: __m128i, b: __m128i) -> __m128i;

    /// `mask ? desired : otherwise`
    unsafe fn blend_si128(mask: __m128i, desired: __m128i, otherwise: __m128i) -> __m128i;

    /// `mask ? desired : otherwise`
    unsafe fn blend_ps(mask: __m128, desired: __m128, otherwise: __m128) -> __m128;
}

#[derive(Debug, Clone, Copy)]
pub struct Sse2;

#[derive(Debug, Clone, Copy)]
pub struct Sse41;

impl Isa for Sse2 {
    // movups is at least as fast as movdqu on every SSE2-only CPU we care about
    #[inline(always)]
    unsafe fn loadu_si128(ptr: *const __m128i) -> __m128i {
        _mm_castps_si128(_mm_loadu_ps(ptr.cast()))
    }

    // There is no unsigned 16-bit min before SSE4.1, so shift both operands
    // into signed range and back.
    #[inline(always)]
    unsafe fn min_epu16(a: __m128i, b: __m128i) -> __m128i {
        let bias = _mm_set1_epi16(i16::MIN);
        _mm_xor_si128(
            _mm_min_epi16(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias)),
            bias,
        )
    }

    #[inline(always)]
    unsafe fn max_epu16(a: __m128i, b: __m128i) -> __m128i {
        let bias = _mm_set1_epi16(i16::MIN);
        _mm_xor_si128(
            _mm_max_epi16(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias)),
            bias,
        )
    }

    #[inline(always)]
    unsafe fn blend_si128(mask: __m128i, desired: __m128i, otherwise: __m128i) -> __m128i {
        _mm_or_si128(
            _mm_and_si128(mask, desired),
            _mm_andnot_si128(mask, otherwise),
        )
    }

    #[inline(always)]
    unsafe fn blend_ps(mask: __m128, desired: __m128, otherwise: __m128) -> __m128 {
        _mm_or_ps(_mm_and_ps(mask, desired), _mm_andnot_ps(mask, otherwise))
    }
}

impl Isa for Sse41 {
    // lddqu is still faster than movdqu for loads crossing a cache line on
    // older Intel cores
    #[inline(always)]
    unsafe fn loadu_si128(ptr: *const __m128i) -> __m128i {
        _mm_lddqu_si128(ptr)
    }

    #[inline(always)]
    unsafe fn min_epu16(a: __m128i, b: __m128i) -> __m128i {
        _mm_min_epu16(a, b)
    }

    #[inline(always)]
    unsafe fn max_epu16(a: __m128i, b: __m128i) -> __m128i {
        _mm_max_epu16(a, b)
    }

    #[inline(always)]
    unsafe fn blend_si128(mask: __m128i, desired: __m128i, otherwise: __m128i) -> __m128i {
        // Equality masks cover whole lanes, so the byte blend works for 16-bit lanes too
        _mm_blendv_epi8(otherwise, desired, mask)
    }

    #[inline(always)]
    unsafe fn blend_ps(mask: __m128, desired: __m128, otherwise: __m128) -> __m128 {
        _mm_blendv_ps(otherwise, desired, mask)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct U8x16<I>(__m128i, PhantomData<I>);

#[derive(Debug, Clone, Copy)]
pub struct U16x8<I>(__m128i, PhantomData<I>);

#[derive(Debug, Clone, Copy)]
pub struct F32x4<I>(__m128, PhantomData<I>);

impl<I> U8x16<I> {
    #[inline(always)]
    fn new(value: __m128i) -> Self {
        Self(value, PhantomData)
    }
}

impl<I> U16x8<I> {
    #[inline(always)]
    fn new(value: __m128i) -> Self {
        Self(value, PhantomData)
    }
}

impl<I> F32x4<I> {
    #[inline(always)]
    fn new(value: __m128) -> Self {
        Self(value, PhantomData)
    }
}

impl<I: Isa> SimdVector for U8x16<I> {
    type Sample = u8;

    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self::new(I::loadu_si128(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const u8) -> Self {
        debug_assert!(ptr.cast::<__m128i>().is_aligned());
        Self::new(_mm_load_si128(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u8) {
        _mm_storeu_si128(ptr.cast(), self.0);
    }

    #[inline(always)]
    unsafe fn splat(value: u8) -> Self {
        Self::new(_mm_set1_epi8(value as i8))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self::new(_mm_min_epu8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self::new(_mm_max_epu8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn adds(self, other: Self) -> Self {
        Self::new(_mm_adds_epu8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn subs(self, other: Self) -> Self {
        Self::new(_mm_subs_epu8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs_diff(self, other: Self) -> Self {
        let positive = _mm_subs_epu8(self.0, other.0);
        let negative = _mm_subs_epu8(other.0, self.0);
        Self::new(_mm_or_si128(positive, negative))
    }

    #[inline(always)]
    unsafe fn avg(self, other: Self) -> Self {
        Self::new(_mm_avg_epu8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn eq_mask(self, other: Self) -> Self {
        Self::new(_mm_cmpeq_epi8(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn blend(mask: Self, desired: Self, otherwise: Self) -> Self {
        Self::new(I::blend_si128(mask.0, desired.0, otherwise.0))
    }
}

impl<I: Isa> SimdVector for U16x8<I> {
    type Sample = u16;

    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load(ptr: *const u16) -> Self {
        Self::new(I::loadu_si128(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const u16) -> Self {
        debug_assert!(ptr.cast::<__m128i>().is_aligned());
        Self::new(_mm_load_si128(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u16) {
        _mm_storeu_si128(ptr.cast(), self.0);
    }

    #[inline(always)]
    unsafe fn splat(value: u16) -> Self {
        Self::new(_mm_set1_epi16(value as i16))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self::new(I::min_epu16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self::new(I::max_epu16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn adds(self, other: Self) -> Self {
        Self::new(_mm_adds_epu16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn subs(self, other: Self) -> Self {
        Self::new(_mm_subs_epu16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs_diff(self, other: Self) -> Self {
        let positive = _mm_subs_epu16(self.0, other.0);
        let negative = _mm_subs_epu16(other.0, self.0);
        Self::new(_mm_or_si128(positive, negative))
    }

    #[inline(always)]
    unsafe fn avg(self, other: Self) -> Self {
        Self::new(_mm_avg_epu16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn eq_mask(self, other: Self) -> Self {
        Self::new(_mm_cmpeq_epi16(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn blend(mask: Self, desired: Self, otherwise: Self) -> Self {
        Self::new(I::blend_si128(mask.0, desired.0, otherwise.0))
    }
}

impl<I: Isa> SimdVector for F32x4<I> {
    type Sample = f32;

    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self::new(_mm_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(ptr.cast::<__m128>().is_aligned());
        Self::new(_mm_load_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self::new(_mm_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self::new(_mm_min_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self::new(_mm_max_ps(self.0, other.0))
    }

    // no float clamp
    #[inline(always)]
    unsafe fn adds(self, other: Self) -> Self {
        Self::new(_mm_add_ps(self.0, other.0))
    }

    // no float clamp
    #[inline(always)]
    unsafe fn subs(self, other: Self) -> Self {
        Self::new(_mm_sub_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs_diff(self, other: Self) -> Self {
        let abs_mask = _mm_castsi128_ps(_mm_set1_epi32(i32::MAX));
        Self::new(_mm_and_ps(_mm_sub_ps(self.0, other.0), abs_mask))
    }

    #[inline(always)]
    unsafe fn avg(self, other: Self) -> Self {
        Self::new(_mm_mul_ps(_mm_add_ps(self.0, other.0), _mm_set1_ps(0.5)))
    }

    #[inline(always)]
    unsafe fn eq_mask(self, other: Self) -> Self {
        Self::new(_mm_cmpeq_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn extrapolate(self, from: Self, _peak: Self) -> Self {
        Self::new(_mm_add_ps(self.0, _mm_sub_ps(self.0, from.0)))
    }

    #[inline(always)]
    unsafe fn blend(mask: Self, desired: Self, otherwise: Self) -> Self {
        Self::new(I::blend_ps(mask.0, desired.0, otherwise.0))
    }
}
