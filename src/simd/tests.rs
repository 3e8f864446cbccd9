#![allow(clippy::unwrap_used, reason = "allow in test files")]

use super::*;

#[test]
fn tiers_are_ordered() {
    assert!(SimdTier::Scalar < SimdTier::Sse2);
    assert!(SimdTier::Sse2 < SimdTier::Sse41);
}

#[test]
fn available_tiers_end_at_detected() {
    let available = SimdTier::available();
    assert_eq!(available.first(), Some(&SimdTier::Scalar));
    assert_eq!(available.last(), Some(&SimdTier::detect()));
}

#[test]
fn resolve_never_exceeds_detected() {
    let best = SimdTier::detect();
    assert_eq!(SimdTier::resolve(None), best);
    assert_eq!(SimdTier::resolve(Some(SimdTier::Scalar)), SimdTier::Scalar);
    assert_eq!(SimdTier::resolve(Some(SimdTier::Sse41)), best);
}

#[cfg(feature = "no_simd")]
#[test]
fn no_simd_forces_scalar() {
    assert_eq!(SimdTier::detect(), SimdTier::Scalar);
}

#[cfg(target_arch = "x86_64")]
mod vectors {
    use pastey::paste;

    use super::*;

    unsafe fn lanes<V: SimdVector>(vector: V) -> Vec<V::Sample> {
        let mut out = vec![V::Sample::default(); V::LANES];
        vector.store(out.as_mut_ptr());
        out
    }

    macro_rules! create_tests {
        ($tier:ident) => {
            paste! {
                #[test]
                fn [<u16_min_max_are_unsigned_ $tier:lower>]() {
                    if !SimdTier::available().contains(&SimdTier::$tier) {
                        return;
                    }
                    let a = [0u16, 1, 32767, 32768, 40000, 65535, 100, 65535];
                    let b = [65535u16, 0, 32768, 32767, 39999, 0, 100, 65534];
                    unsafe {
                        let va = U16x8::<$tier>::load(a.as_ptr());
                        let vb = U16x8::<$tier>::load(b.as_ptr());
                        let expected_min: Vec<u16> =
                            a.iter().zip(&b).map(|(x, y)| *x.min(y)).collect();
                        let expected_max: Vec<u16> =
                            a.iter().zip(&b).map(|(x, y)| *x.max(y)).collect();
                        assert_eq!(lanes(va.min(vb)), expected_min);
                        assert_eq!(lanes(va.max(vb)), expected_max);
                    }
                }

                #[test]
                fn [<u8_saturating_arithmetic_ $tier:lower>]() {
                    if !SimdTier::available().contains(&SimdTier::$tier) {
                        return;
                    }
                    unsafe {
                        let a = U8x16::<$tier>::splat(200);
                        let b = U8x16::<$tier>::splat(100);
                        assert_eq!(lanes(a.adds(b)), vec![255; 16]);
                        assert_eq!(lanes(b.subs(a)), vec![0; 16]);
                        assert_eq!(lanes(a.abs_diff(b)), vec![100; 16]);
                        assert_eq!(lanes(b.abs_diff(a)), vec![100; 16]);
                        assert_eq!(lanes(a.avg(U8x16::<$tier>::splat(101))), vec![151; 16]);
                        let zero = U8x16::<$tier>::splat(0);
                        assert_eq!(lanes(a.extrapolate(zero, a.max(b))), vec![200; 16]);
                    }
                }

                #[test]
                fn [<select_on_equal_ $tier:lower>]() {
                    if !SimdTier::available().contains(&SimdTier::$tier) {
                        return;
                    }
                    let cmp = [1u16, 2, 3, 4, 5, 6, 7, 8];
                    let other = [1u16, 0, 3, 0, 5, 0, 7, 0];
                    unsafe {
                        let picked = U16x8::<$tier>::select_on_equal(
                            U16x8::<$tier>::load(cmp.as_ptr()),
                            U16x8::<$tier>::load(other.as_ptr()),
                            U16x8::<$tier>::splat(10),
                            U16x8::<$tier>::splat(20),
                        );
                        assert_eq!(lanes(picked), vec![20, 10, 20, 10, 20, 10, 20, 10]);
                    }
                }

                #[test]
                fn [<f32_arithmetic_ $tier:lower>]() {
                    if !SimdTier::available().contains(&SimdTier::$tier) {
                        return;
                    }
                    let a = [0.25f32, -1.0, 3.0, 0.0];
                    let b = [0.75f32, 1.0, -3.0, 0.0];
                    unsafe {
                        let va = F32x4::<$tier>::load(a.as_ptr());
                        let vb = F32x4::<$tier>::load(b.as_ptr());
                        assert_eq!(lanes(va.abs_diff(vb)), vec![0.5, 2.0, 6.0, 0.0]);
                        assert_eq!(lanes(va.avg(vb)), vec![0.5, 0.0, 0.0, 0.0]);
                        // No saturation on float lanes
                        assert_eq!(lanes(va.adds(vb)), vec![1.0, 0.0, 0.0, 0.0]);
                        assert_eq!(lanes(va.extrapolate(vb, vb)), vec![-0.25, -3.0, 9.0, 0.0]);

                        let mask = va.eq_mask(F32x4::<$tier>::splat(3.0));
                        let picked = F32x4::<$tier>::blend(
                            mask,
                            F32x4::<$tier>::splat(1.0),
                            F32x4::<$tier>::splat(2.0),
                        );
                        assert_eq!(lanes(picked), vec![2.0, 2.0, 1.0, 2.0]);
                    }
                }

                #[test]
                fn [<aligned_load_ $tier:lower>]() {
                    if !SimdTier::available().contains(&SimdTier::$tier) {
                        return;
                    }
                    let storage = [0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10u128; 2];
                    let bytes: &[u8] = bytemuck::cast_slice(&storage);
                    unsafe {
                        let aligned = U8x16::<$tier>::load_aligned(bytes.as_ptr().add(16));
                        let unaligned = U8x16::<$tier>::load(bytes.as_ptr().add(16));
                        assert_eq!(lanes(aligned), lanes(unaligned));
                        assert_eq!(lanes(aligned), bytes[16..].to_vec());
                    }
                }
            }
        };
    }

    create_tests!(Sse2);
    create_tests!(Sse41);
}
