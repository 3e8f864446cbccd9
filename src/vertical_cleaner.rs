use anyhow::{Result, anyhow, bail};
use vapoursynth::{
    format::{Format, SampleType},
    frame::{FrameRef, FrameRefMut},
    node::Node,
    plugins::Filter,
    prelude::Property,
};

use crate::{
    filter::PlaneFilter,
    params::{BorderPolicy, PlaneSet, SampleFormat, parse_opt, resolve_plane_modes},
    simd::SimdTier,
    util::{plane_bytes, plane_bytes_mut},
};

/// Repairs every plane of a clip with a small pixel-neighborhood filter.
///
/// Each plane gets its own mode. Planes whose mode is `Copy` or `Skip` come
/// through unchanged from the source frame.
pub struct VerticalCleaner<'core> {
    /// Input clip
    clip: Node<'core>,
    format: Format<'core>,
    /// One resolved filter per plane, `None` for planes that are passed
    /// through.
    filters: [Option<PlaneFilter>; 3],
    planes: PlaneSet,
}

impl<'core> VerticalCleaner<'core> {
    pub fn new(
        clip: Node<'core>,
        mode: i64,
        modeu: Option<i64>,
        modev: Option<i64>,
        border: Option<i64>,
        opt: Option<i64>,
    ) -> Result<Self> {
        // Parse arguments
        let modes = resolve_plane_modes(mode, modeu, modev)
            .map_err(|e| anyhow!("VerticalCleaner: {e}"))?;
        let border = border
            .map(BorderPolicy::try_from)
            .unwrap_or(Ok(BorderPolicy::default()))
            .map_err(|e| anyhow!("VerticalCleaner: {e}"))?;
        let requested = opt
            .map(parse_opt)
            .unwrap_or(Ok(None))
            .map_err(|e| anyhow!("VerticalCleaner: {e}"))?;
        let tier = SimdTier::resolve(requested);

        // Validate video info
        let video_info = clip.info();
        if let Property::Variable = video_info.resolution {
            bail!("VerticalCleaner: variable resolution input clips are not supported");
        }
        let format = match video_info.format {
            Property::Variable => {
                bail!("VerticalCleaner: variable format input clips are not supported")
            }
            Property::Constant(format) => format,
        };
        let bits = format.bits_per_sample();
        let sample_format = SampleFormat::new(format.sample_type() == SampleType::Float, bits)
            .map_err(|_| {
                anyhow!("VerticalCleaner: input clip must be 8-16 bit integer or 32 bit float")
            })?;

        let plane_count = format.plane_count().min(3);
        let mut filters = [None; 3];
        let mut planes = PlaneSet::empty();
        for (plane, mode) in modes.into_iter().enumerate().take(plane_count) {
            if !mode.is_filtering() {
                continue;
            }
            let filter = PlaneFilter::with_tier(mode, sample_format, border, tier)
                .map_err(|e| anyhow!("VerticalCleaner: plane {plane}: {e}"))?;
            filters[plane] = Some(filter);
            planes |= PlaneSet::plane(plane);
        }

        log::debug!(
            "VerticalCleaner: {} planes of {sample_format} samples, filtering {planes:?}",
            plane_count
        );

        Ok(Self {
            clip,
            format,
            filters,
            planes,
        })
    }
}

impl<'core> Filter<'core> for VerticalCleaner<'core> {
    fn video_info(
        &self,
        _api: vapoursynth::prelude::API,
        _core: vapoursynth::core::CoreRef<'core>,
    ) -> Vec<vapoursynth::video_info::VideoInfo<'core>> {
        vec![self.clip.info()]
    }

    fn get_frame_initial(
        &self,
        _api: vapoursynth::prelude::API,
        _core: vapoursynth::core::CoreRef<'core>,
        context: vapoursynth::plugins::FrameContext,
        n: usize,
    ) -> std::result::Result<Option<FrameRef<'core>>, anyhow::Error> {
        self.clip.request_frame_filter(context, n);
        Ok(None)
    }

    fn get_frame(
        &self,
        _api: vapoursynth::prelude::API,
        core: vapoursynth::core::CoreRef<'core>,
        context: vapoursynth::plugins::FrameContext,
        n: usize,
    ) -> std::result::Result<FrameRef<'core>, anyhow::Error> {
        let src = self.clip.get_frame_filter(context, n).ok_or_else(|| {
            anyhow!("VerticalCleaner: called get_frame_filter before request_frame_filter")
        })?;

        // Copy and Skip planes are already correct in the copy
        let mut dest = FrameRefMut::copy_of(core, &src);
        if self.planes.is_empty() {
            return Ok(dest.into());
        }

        for (plane, filter) in self.filters.iter().enumerate() {
            let Some(filter) = filter else {
                continue;
            };
            debug_assert!(self.planes.contains(PlaneSet::plane(plane)));
            debug_assert_eq!(
                filter.format().bytes_per_sample(),
                usize::from(self.format.bytes_per_sample())
            );

            let width = src.width(plane);
            let height = src.height(plane);
            let src_stride = src.stride(plane);
            let dest_stride = dest.stride(plane);
            let src_plane = plane_bytes(&src, plane)?;
            let dest_plane = plane_bytes_mut(&mut dest, plane)?;

            filter
                .process(dest_plane, dest_stride, src_plane, src_stride, width, height)
                .map_err(|e| anyhow!("VerticalCleaner: plane {plane}: {e}"))?;
        }

        Ok(dest.into())
    }
}

