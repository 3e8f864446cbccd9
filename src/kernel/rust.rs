use super::SORT8_NETWORK;
use crate::{
    neighborhood::{Column3, Column5, Neighborhood},
    util::Pixel,
};

pub(super) fn vertical_median<T: Pixel>(w: Column3<T>) -> T {
    w.c.clip(w.up.sample_min(w.down), w.up.sample_max(w.down))
}

pub(super) fn relaxed_vertical_median<T: Pixel>(w: Column5<T>, peak: T) -> T {
    let from_above = w.up.extrapolate(w.up2, peak);
    let from_below = w.down.extrapolate(w.down2, peak);

    let upper = w
        .up
        .sample_max(w.down)
        .sample_max(from_above.sample_min(from_below));
    let lower = w
        .up
        .sample_min(w.down)
        .sample_min(from_above.sample_max(from_below));

    w.c.clip(lower, upper)
}

pub(super) fn rank_clamp<T: Pixel, const RANK: usize>(n: Neighborhood<T>) -> T {
    debug_assert!((1..=4).contains(&RANK));
    let sorted = sort8(n.neighbors());
    n.c.clip(sorted[RANK - 1], sorted[8 - RANK])
}

pub(super) fn line_clip<T: Pixel>(n: Neighborhood<T>) -> T {
    let clip_to = |a: T, b: T| n.c.clip(a.sample_min(b), a.sample_max(b));

    let clipped1 = clip_to(n.a1, n.a8);
    let clipped2 = clip_to(n.a2, n.a7);
    let clipped3 = clip_to(n.a3, n.a6);
    let clipped4 = clip_to(n.a4, n.a5);

    let d1 = n.c.distance(clipped1);
    let d2 = n.c.distance(clipped2);
    let d3 = n.c.distance(clipped3);
    let d4 = n.c.distance(clipped4);

    let least = d1.sample_min(d2).sample_min(d3).sample_min(d4);

    // Ties go to the horizontal line, then vertical, then the diagonals
    if least == d4 {
        clipped4
    } else if least == d2 {
        clipped2
    } else if least == d3 {
        clipped3
    } else if least == d1 {
        clipped1
    } else {
        // Only reachable through NaN distances
        n.c
    }
}

pub(super) fn neighbor_median<T: Pixel>(n: Neighborhood<T>) -> T {
    let sorted = sort8(n.neighbors());
    sorted[3].average(sorted[4])
}

fn sort8<T: Pixel>(mut values: [T; 8]) -> [T; 8] {
    for (i, j) in SORT8_NETWORK {
        let (a, b) = (values[i], values[j]);
        values[i] = a.sample_min(b);
        values[j] = a.sample_max(b);
    }
    values
}
