#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use bytemuck::Pod;

use crate::{
    driver::{PlaneFn, plane_fn},
    error::{ConfigError, FilterError, GeometryError},
    kernel::{LineClip, NeighborMedian, RankClamp, RelaxedVerticalMedian, VerticalMedian},
    params::{BorderPolicy, Mode, SampleFormat},
    simd::SimdTier,
    util::{Pixel, vs_bitblt},
};

/// A plane's processing resolved once at setup: mode, sample format, border
/// policy and instruction-set tier.
///
/// Processing a plane afterwards is a single indirect call.
#[derive(Debug, Clone, Copy)]
pub struct PlaneFilter {
    mode: Mode,
    format: SampleFormat,
    border: BorderPolicy,
    tier: SimdTier,
    op: PlaneOp,
}

#[derive(Debug, Clone, Copy)]
enum PlaneOp {
    Copy,
    U8(PlaneFn<u8>),
    U16(PlaneFn<u16>),
    F32(PlaneFn<f32>),
}

impl PlaneFilter {
    /// Resolves the filter for the best tier the CPU supports.
    pub fn new(
        mode: Mode,
        format: SampleFormat,
        border: BorderPolicy,
    ) -> Result<Self, ConfigError> {
        Self::with_tier(mode, format, border, SimdTier::detect())
    }

    /// Resolves the filter for `tier`, or the closest tier below it that the
    /// CPU supports.
    pub fn with_tier(
        mode: Mode,
        format: SampleFormat,
        border: BorderPolicy,
        tier: SimdTier,
    ) -> Result<Self, ConfigError> {
        if mode == Mode::Undefined {
            return Err(ConfigError::UndefinedMode);
        }

        let tier = SimdTier::resolve(Some(tier));
        let op = match format {
            SampleFormat::U8 => kernel_fn::<u8>(mode, tier).map_or(PlaneOp::Copy, PlaneOp::U8),
            SampleFormat::U16 { .. } => {
                kernel_fn::<u16>(mode, tier).map_or(PlaneOp::Copy, PlaneOp::U16)
            }
            SampleFormat::F32 => kernel_fn::<f32>(mode, tier).map_or(PlaneOp::Copy, PlaneOp::F32),
        };

        log::debug!("plane filter: mode {mode}, {format} samples, {border:?} border, {tier:?}");

        Ok(Self {
            mode,
            format,
            border,
            tier,
            op,
        })
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    #[must_use]
    pub fn border(&self) -> BorderPolicy {
        self.border
    }

    /// The tier actually used, after lowering to what the CPU supports.
    #[must_use]
    pub fn tier(&self) -> SimdTier {
        self.tier
    }

    /// Filters `width` x `height` samples from `src` into `dest`.
    ///
    /// Strides are in bytes. Both buffers are validated before anything is
    /// written, and bytes past `width` samples in each destination row are
    /// left alone.
    pub fn process(
        &self,
        dest: &mut [u8],
        dest_stride: usize,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
    ) -> Result<(), FilterError> {
        let sample_size = self.format.bytes_per_sample();
        let width = NonZeroUsize::new(width).ok_or(GeometryError::ZeroWidth)?;
        let height = NonZeroUsize::new(height).ok_or(GeometryError::ZeroHeight)?;
        let src_plane = Plane::new(src, src_stride, width, height, sample_size)?;
        let dest_plane = Plane::new(dest, dest_stride, width, height, sample_size)?;
        let border = self.border;

        match self.op {
            PlaneOp::Copy => {
                let row_bytes = NonZeroUsize::new(width.get() * sample_size)
                    .ok_or(GeometryError::ZeroWidth)?;
                vs_bitblt(dest, dest_plane.stride, src, src_plane.stride, row_bytes, height);
            }
            PlaneOp::U8(f) => {
                run(f, dest, dest_plane, src, src_plane, width, height, u8::MAX, border)?;
            }
            PlaneOp::U16(f) => {
                let peak = u16::peak(self.format.bits_per_sample());
                run(f, dest, dest_plane, src, src_plane, width, height, peak, border)?;
            }
            PlaneOp::F32(f) => {
                run(f, dest, dest_plane, src, src_plane, width, height, f32::MAX, border)?;
            }
        }

        Ok(())
    }
}

/// Filters one plane in a single call. See [`PlaneFilter::process`].
pub fn process_plane(
    dest: &mut [u8],
    dest_stride: usize,
    src: &[u8],
    src_stride: usize,
    width: usize,
    height: usize,
    format: SampleFormat,
    mode: Mode,
    border: BorderPolicy,
) -> Result<(), FilterError> {
    PlaneFilter::new(mode, format, border)?.process(
        dest,
        dest_stride,
        src,
        src_stride,
        width,
        height,
    )
}

fn kernel_fn<T: Pixel>(mode: Mode, tier: SimdTier) -> Option<PlaneFn<T>> {
    Some(match mode {
        Mode::Undefined | Mode::Skip | Mode::Copy => return None,
        Mode::VerticalMedian => plane_fn::<T, VerticalMedian>(tier),
        Mode::RelaxedVerticalMedian => plane_fn::<T, RelaxedVerticalMedian>(tier),
        Mode::Clamp => plane_fn::<T, RankClamp<1>>(tier),
        Mode::ClampSecond => plane_fn::<T, RankClamp<2>>(tier),
        Mode::ClampThird => plane_fn::<T, RankClamp<3>>(tier),
        Mode::Median => plane_fn::<T, RankClamp<4>>(tier),
        Mode::LineClip => plane_fn::<T, LineClip>(tier),
        Mode::NeighborMedian => plane_fn::<T, NeighborMedian>(tier),
    })
}

/// A byte buffer checked to hold a strided plane.
#[derive(Debug, Clone, Copy)]
struct Plane {
    stride: NonZeroUsize,
    /// Bytes from the first sample to the end of the last row's samples.
    len: usize,
}

impl Plane {
    fn new(
        buffer: &[u8],
        stride: usize,
        width: NonZeroUsize,
        height: NonZeroUsize,
        sample_size: usize,
    ) -> Result<Self, GeometryError> {
        let row_bytes = width.get() * sample_size;
        let stride = NonZeroUsize::new(stride)
            .filter(|stride| stride.get() >= row_bytes)
            .ok_or(GeometryError::StrideTooSmall { stride, row_bytes })?;
        if stride.get() % sample_size != 0 || (buffer.as_ptr() as usize) % sample_size != 0 {
            return Err(GeometryError::Misaligned { sample_size });
        }

        let len = (height.get() - 1)
            .checked_mul(stride.get())
            .and_then(|rows| rows.checked_add(row_bytes))
            .unwrap_or(usize::MAX);
        if buffer.len() < len {
            return Err(GeometryError::BufferTooSmall {
                len: buffer.len(),
                required: len,
            });
        }

        Ok(Self { stride, len })
    }

    /// Stride in samples of `size` bytes.
    fn stride_in(&self, size: usize) -> NonZeroUsize {
        // The stride is a non-zero multiple of `size`
        NonZeroUsize::new(self.stride.get() / size).unwrap_or(NonZeroUsize::MIN)
    }
}

fn run<T: Pixel + Pod>(
    f: PlaneFn<T>,
    dest: &mut [u8],
    dest_plane: Plane,
    src: &[u8],
    src_plane: Plane,
    width: NonZeroUsize,
    height: NonZeroUsize,
    peak: T,
    border: BorderPolicy,
) -> Result<(), GeometryError> {
    let sample_size = size_of::<T>();
    let misaligned = |_| GeometryError::Misaligned { sample_size };
    let src: &[T] = bytemuck::try_cast_slice(&src[..src_plane.len]).map_err(misaligned)?;
    let dest: &mut [T] =
        bytemuck::try_cast_slice_mut(&mut dest[..dest_plane.len]).map_err(misaligned)?;

    f(
        dest,
        dest_plane.stride_in(sample_size),
        src,
        src_plane.stride_in(sample_size),
        width,
        height,
        peak,
        border,
    );
    Ok(())
}
