use super::SORT8_NETWORK;
use crate::{
    neighborhood::{Column3, Column5, Neighborhood},
    simd::SimdVector,
};

#[inline(always)]
pub(super) unsafe fn vertical_median<V: SimdVector>(w: Column3<V>) -> V {
    let (low, high) = V::sort_pair(w.up, w.down);
    w.c.clip(low, high)
}

#[inline(always)]
pub(super) unsafe fn relaxed_vertical_median<V: SimdVector>(w: Column5<V>, peak: V) -> V {
    let from_above = w.up.extrapolate(w.up2, peak);
    let from_below = w.down.extrapolate(w.down2, peak);

    let (low, high) = V::sort_pair(w.up, w.down);
    let (trend_low, trend_high) = V::sort_pair(from_above, from_below);

    w.c.clip(low.min(trend_high), high.max(trend_low))
}

#[inline(always)]
pub(super) unsafe fn rank_clamp<V: SimdVector, const RANK: usize>(n: Neighborhood<V>) -> V {
    let sorted = sort8(n.neighbors());
    n.c.clip(sorted[RANK - 1], sorted[8 - RANK])
}

#[inline(always)]
pub(super) unsafe fn line_clip<V: SimdVector>(n: Neighborhood<V>) -> V {
    let clip_to = |a: V, b: V| {
        let (low, high) = V::sort_pair(a, b);
        n.c.clip(low, high)
    };

    let clipped1 = clip_to(n.a1, n.a8);
    let clipped2 = clip_to(n.a2, n.a7);
    let clipped3 = clip_to(n.a3, n.a6);
    let clipped4 = clip_to(n.a4, n.a5);

    let d1 = n.c.abs_diff(clipped1);
    let d2 = n.c.abs_diff(clipped2);
    let d3 = n.c.abs_diff(clipped3);
    let d4 = n.c.abs_diff(clipped4);

    let least = d1.min(d2).min(d3).min(d4);

    // Later selections win, so the lowest priority goes first
    let result = V::select_on_equal(least, d1, n.c, clipped1);
    let result = V::select_on_equal(least, d3, result, clipped3);
    let result = V::select_on_equal(least, d2, result, clipped2);
    V::select_on_equal(least, d4, result, clipped4)
}

#[inline(always)]
pub(super) unsafe fn neighbor_median<V: SimdVector>(n: Neighborhood<V>) -> V {
    let sorted = sort8(n.neighbors());
    sorted[3].avg(sorted[4])
}

#[inline(always)]
unsafe fn sort8<V: SimdVector>(mut values: [V; 8]) -> [V; 8] {
    for (i, j) in SORT8_NETWORK {
        (values[i], values[j]) = V::sort_pair(values[i], values[j]);
    }
    values
}
