//! Windows of samples around a center pixel, read either one sample at a
//! time with edge clamping or one vector at a time from raw row pointers.


use crate::{simd::SimdVector, util::Pixel};

/// The center and its 8 neighbors, in the order
///
/// ```text
/// a1 a2 a3
/// a4 c  a5
/// a6 a7 a8
/// ```
///
/// `P` is either a single sample or a vector of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood<P> {
    pub a1: P,
    pub a2: P,
    pub a3: P,
    pub a4: P,
    pub c: P,
    pub a5: P,
    pub a6: P,
    pub a7: P,
    pub a8: P,
}

impl<P: Copy> Neighborhood<P> {
    /// The 8 neighbors in compass order: NW, N, NE, W, E, SW, S, SE.
    pub fn neighbors(&self) -> [P; 8] {
        [
            self.a1, self.a2, self.a3, self.a4, self.a5, self.a6, self.a7, self.a8,
        ]
    }
}

/// The center and the pixels directly above and below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column3<P> {
    pub up: P,
    pub c: P,
    pub down: P,
}

/// The center and the two pixels above and below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column5<P> {
    pub up2: P,
    pub up: P,
    pub c: P,
    pub down: P,
    pub down2: P,
}

/// Shape of the window a kernel reads around each pixel.
pub trait Footprint {
    /// Columns the window reaches to each side of the center.
    const REACH_X: usize;
    /// Rows the window reaches above and below the center.
    const REACH_Y: usize;

    type Window<P: Copy>: Copy;

    /// Reads the window around `(x, y)`, clamping coordinates that fall
    /// outside the `width` x `height` plane to its nearest edge.
    fn gather<T: Pixel>(
        src: &[T],
        pitch: usize,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
    ) -> Self::Window<T>;

    /// Loads `V::LANES` windows whose centers start at `ptr`.
    ///
    /// With `ALIGNED`, the taps in the center column use aligned loads.
    ///
    /// # Safety
    /// Every tap of every lane must be inside the plane: `REACH_X` samples to
    /// the left of `ptr` and `LANES + REACH_X` samples from it must be in the
    /// same row, and `REACH_Y` rows above and below must exist. With
    /// `ALIGNED`, `ptr` and `pitch` in bytes must be multiples of 16.
    unsafe fn load<V: SimdVector, const ALIGNED: bool>(
        ptr: *const V::Sample,
        pitch: usize,
    ) -> Self::Window<V>;
}

/// Reads the sample at `(x + dx, y + dy)`, clamped to the plane.
#[inline(always)]
fn clamped<T: Pixel>(
    src: &[T],
    pitch: usize,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
) -> T {
    let x = x.saturating_add_signed(dx).min(width - 1);
    let y = y.saturating_add_signed(dy).min(height - 1);
    src[y * pitch + x]
}

#[inline(always)]
unsafe fn load_center<V: SimdVector, const ALIGNED: bool>(ptr: *const V::Sample) -> V {
    if ALIGNED {
        V::load_aligned(ptr)
    } else {
        V::load(ptr)
    }
}

/// The full 3x3 neighborhood.
pub struct Square;

/// The center and one row above and below.
pub struct Vertical3;

/// The center and two rows above and below.
pub struct Vertical5;

impl Footprint for Square {
    const REACH_X: usize = 1;
    const REACH_Y: usize = 1;

    type Window<P: Copy> = Neighborhood<P>;

    #[inline(always)]
    fn gather<T: Pixel>(
        src: &[T],
        pitch: usize,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
    ) -> Neighborhood<T> {
        let at = |dx, dy| clamped(src, pitch, width, height, x, y, dx, dy);
        Neighborhood {
            a1: at(-1, -1),
            a2: at(0, -1),
            a3: at(1, -1),
            a4: at(-1, 0),
            c: at(0, 0),
            a5: at(1, 0),
            a6: at(-1, 1),
            a7: at(0, 1),
            a8: at(1, 1),
        }
    }

    #[inline(always)]
    unsafe fn load<V: SimdVector, const ALIGNED: bool>(
        ptr: *const V::Sample,
        pitch: usize,
    ) -> Neighborhood<V> {
        let above = ptr.sub(pitch);
        let below = ptr.add(pitch);
        Neighborhood {
            a1: V::load(above.sub(1)),
            a2: load_center::<V, ALIGNED>(above),
            a3: V::load(above.add(1)),
            a4: V::load(ptr.sub(1)),
            c: load_center::<V, ALIGNED>(ptr),
            a5: V::load(ptr.add(1)),
            a6: V::load(below.sub(1)),
            a7: load_center::<V, ALIGNED>(below),
            a8: V::load(below.add(1)),
        }
    }
}

impl Footprint for Vertical3 {
    const REACH_X: usize = 0;
    const REACH_Y: usize = 1;

    type Window<P: Copy> = Column3<P>;

    #[inline(always)]
    fn gather<T: Pixel>(
        src: &[T],
        pitch: usize,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
    ) -> Column3<T> {
        let at = |dy| clamped(src, pitch, width, height, x, y, 0, dy);
        Column3 {
            up: at(-1),
            c: at(0),
            down: at(1),
        }
    }

    #[inline(always)]
    unsafe fn load<V: SimdVector, const ALIGNED: bool>(
        ptr: *const V::Sample,
        pitch: usize,
    ) -> Column3<V> {
        Column3 {
            up: load_center::<V, ALIGNED>(ptr.sub(pitch)),
            c: load_center::<V, ALIGNED>(ptr),
            down: load_center::<V, ALIGNED>(ptr.add(pitch)),
        }
    }
}

impl Footprint for Vertical5 {
    const REACH_X: usize = 0;
    const REACH_Y: usize = 2;

    type Window<P: Copy> = Column5<P>;

    #[inline(always)]
    fn gather<T: Pixel>(
        src: &[T],
        pitch: usize,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
    ) -> Column5<T> {
        let at = |dy| clamped(src, pitch, width, height, x, y, 0, dy);
        Column5 {
            up2: at(-2),
            up: at(-1),
            c: at(0),
            down: at(1),
            down2: at(2),
        }
    }

    #[inline(always)]
    unsafe fn load<V: SimdVector, const ALIGNED: bool>(
        ptr: *const V::Sample,
        pitch: usize,
    ) -> Column5<V> {
        Column5 {
            up2: load_center::<V, ALIGNED>(ptr.sub(2 * pitch)),
            up: load_center::<V, ALIGNED>(ptr.sub(pitch)),
            c: load_center::<V, ALIGNED>(ptr),
            down: load_center::<V, ALIGNED>(ptr.add(pitch)),
            down2: load_center::<V, ALIGNED>(ptr.add(2 * pitch)),
        }
    }
}
