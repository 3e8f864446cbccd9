#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;

const ALL_MODES: [Mode; 10] = [
    Mode::Skip,
    Mode::Copy,
    Mode::VerticalMedian,
    Mode::RelaxedVerticalMedian,
    Mode::Clamp,
    Mode::ClampSecond,
    Mode::ClampThird,
    Mode::Median,
    Mode::LineClip,
    Mode::NeighborMedian,
];

const GRID: [u8; 9] = [10, 20, 10, 20, 50, 20, 10, 20, 10];

#[test]
fn neighbor_median_scenario() {
    let mut dest = [0u8; 9];
    process_plane(
        &mut dest,
        3,
        &GRID,
        3,
        3,
        3,
        SampleFormat::U8,
        Mode::NeighborMedian,
        BorderPolicy::Copy,
    )
    .unwrap();
    assert_eq!(dest, [10, 20, 10, 20, 15, 20, 10, 20, 10]);

    let mut dest = [0u8; 9];
    process_plane(
        &mut dest,
        3,
        &GRID,
        3,
        3,
        3,
        SampleFormat::U8,
        Mode::NeighborMedian,
        BorderPolicy::Clamp,
    )
    .unwrap();
    assert_eq!(dest[0], 20);
    assert_eq!(dest[4], 15);
}

#[test]
fn neighbor_median_scenario_on_every_tier() {
    for tier in SimdTier::available() {
        let filter = PlaneFilter::with_tier(
            Mode::NeighborMedian,
            SampleFormat::U8,
            BorderPolicy::Copy,
            tier,
        )
        .unwrap();
        assert_eq!(filter.tier(), tier);

        let mut dest = [0u8; 9];
        filter.process(&mut dest, 3, &GRID, 3, 3, 3).unwrap();
        assert_eq!(dest[4], 15);
    }
}

#[test]
fn sixteen_bit_planes_use_byte_strides() {
    let samples: [u16; 9] = [1000, 2000, 1000, 2000, 5000, 2000, 1000, 2000, 1000];
    // Two padding samples after each row
    let mut src = vec![0u16; 5 * 3];
    for (row, chunk) in samples.chunks(3).enumerate() {
        src[row * 5..row * 5 + 3].copy_from_slice(chunk);
    }
    let mut dest = vec![0u16; 9];

    let filter = PlaneFilter::new(
        Mode::NeighborMedian,
        SampleFormat::U16 { bits: 16 },
        BorderPolicy::Copy,
    )
    .unwrap();
    filter
        .process(
            bytemuck::cast_slice_mut(&mut dest),
            6,
            bytemuck::cast_slice(&src),
            10,
            3,
            3,
        )
        .unwrap();

    assert_eq!(dest, [1000, 2000, 1000, 2000, 1500, 2000, 1000, 2000, 1000]);
}

#[test]
fn float_planes() {
    let samples: [f32; 9] = [0.25, 0.5, 0.25, 0.5, 1.0, 0.5, 0.25, 0.5, 0.25];
    let mut dest = vec![0f32; 9];

    process_plane(
        bytemuck::cast_slice_mut(&mut dest),
        12,
        bytemuck::cast_slice(&samples),
        12,
        3,
        3,
        SampleFormat::F32,
        Mode::Clamp,
        BorderPolicy::Copy,
    )
    .unwrap();

    assert_eq!(dest[4], 0.5);
}

#[test]
fn undefined_mode_is_rejected() {
    let result = PlaneFilter::new(Mode::Undefined, SampleFormat::U8, BorderPolicy::Copy);
    assert_eq!(result.unwrap_err(), ConfigError::UndefinedMode);
}

#[test]
fn relaxed_median_on_float_planes() {
    // The trend 0.0 -> 0.75 -> 1.5 is followed past 1.0 without clamping
    let samples: [f32; 5] = [0.0, 0.75, 2.0, 0.75, 0.0];
    for tier in SimdTier::available() {
        let filter = PlaneFilter::with_tier(
            Mode::RelaxedVerticalMedian,
            SampleFormat::F32,
            BorderPolicy::Copy,
            tier,
        )
        .unwrap();
        let mut dest = [0f32; 5];
        filter
            .process(
                bytemuck::cast_slice_mut(&mut dest),
                4,
                bytemuck::cast_slice(&samples),
                4,
                1,
                5,
            )
            .unwrap();

        assert_eq!(dest, [0.0, 0.75, 1.5, 0.75, 0.0], "{tier:?}");
    }
}

fn geometry_error(
    dest_len: usize,
    dest_stride: usize,
    src_len: usize,
    src_stride: usize,
    width: usize,
    height: usize,
    format: SampleFormat,
) -> GeometryError {
    let mut dest = vec![0x55u8; dest_len];
    let src = vec![0u8; src_len];
    let error = process_plane(
        &mut dest,
        dest_stride,
        &src,
        src_stride,
        width,
        height,
        format,
        Mode::Median,
        BorderPolicy::Clamp,
    )
    .unwrap_err();
    assert!(dest.iter().all(|&value| value == 0x55), "destination was written");

    match error {
        FilterError::Geometry(error) => error,
        FilterError::Config(error) => panic!("expected a geometry error, got {error}"),
    }
}

#[test]
fn bad_geometry_is_rejected_before_writing() {
    assert_eq!(
        geometry_error(16, 4, 16, 4, 0, 4, SampleFormat::U8),
        GeometryError::ZeroWidth
    );
    assert_eq!(
        geometry_error(16, 4, 16, 4, 4, 0, SampleFormat::U8),
        GeometryError::ZeroHeight
    );
    assert_eq!(
        geometry_error(16, 4, 16, 3, 4, 4, SampleFormat::U8),
        GeometryError::StrideTooSmall {
            stride: 3,
            row_bytes: 4
        }
    );
    assert_eq!(
        geometry_error(16, 4, 16, 0, 4, 4, SampleFormat::U8),
        GeometryError::StrideTooSmall {
            stride: 0,
            row_bytes: 4
        }
    );
    assert_eq!(
        geometry_error(16, 4, 15, 4, 4, 4, SampleFormat::U8),
        GeometryError::BufferTooSmall {
            len: 15,
            required: 16
        }
    );
    assert_eq!(
        geometry_error(12, 4, 16, 4, 4, 4, SampleFormat::U8),
        GeometryError::BufferTooSmall {
            len: 12,
            required: 16
        }
    );
    assert_eq!(
        geometry_error(32, 8, 32, 9, 4, 4, SampleFormat::U16 { bits: 10 }),
        GeometryError::Misaligned { sample_size: 2 }
    );
    assert_eq!(
        geometry_error(64, 18, 64, 16, 4, 4, SampleFormat::F32),
        GeometryError::Misaligned { sample_size: 4 }
    );
}

#[test]
fn misaligned_buffers_are_rejected() {
    let src = vec![0u32; 17];
    let src_bytes: &[u8] = bytemuck::cast_slice(&src);
    let mut dest = vec![0u32; 16];

    let error = process_plane(
        bytemuck::cast_slice_mut(&mut dest),
        16,
        &src_bytes[1..],
        16,
        4,
        4,
        SampleFormat::F32,
        Mode::Median,
        BorderPolicy::Copy,
    )
    .unwrap_err();

    assert_eq!(
        error,
        FilterError::Geometry(GeometryError::Misaligned { sample_size: 4 })
    );
    assert!(dest.iter().all(|&value| value == 0));
}

#[quickcheck]
fn passthrough_modes_are_identity(
    samples: Vec<u8>,
    width: usize,
    padding: usize,
    skip: bool,
) -> TestResult {
    let width = width % 24 + 1;
    let stride = width + padding % 8;
    if samples.len() < width {
        return TestResult::discard();
    }
    let height = (samples.len() - width) / stride + 1;
    let mode = if skip { Mode::Skip } else { Mode::Copy };

    let mut dest = vec![0u8; samples.len()];
    process_plane(
        &mut dest,
        stride,
        &samples,
        stride,
        width,
        height,
        SampleFormat::U8,
        mode,
        BorderPolicy::Copy,
    )
    .unwrap();

    let identical = (0..height).all(|y| {
        let row = y * stride..y * stride + width;
        dest[row.clone()] == samples[row]
    });
    TestResult::from_bool(identical)
}

#[test]
fn every_mode_resolves_for_integer_formats() {
    for mode in ALL_MODES {
        for format in [SampleFormat::U8, SampleFormat::U16 { bits: 12 }] {
            let filter = PlaneFilter::new(mode, format, BorderPolicy::default()).unwrap();
            assert_eq!(filter.mode(), mode);
            assert_eq!(filter.format(), format);
            assert_eq!(filter.border(), BorderPolicy::Copy);
        }
    }
}

#[test]
fn every_mode_fills_the_plane() {
    let (width, height) = (19, 7);
    let src: Vec<u8> = (0..width * height).map(|i| (i * 37 % 200) as u8).collect();

    for mode in ALL_MODES {
        for border in [BorderPolicy::Copy, BorderPolicy::Clamp] {
            let stride = width + 5;
            let mut dest = vec![0xEEu8; (height - 1) * stride + width];
            process_plane(
                &mut dest,
                stride,
                &src,
                width,
                width,
                height,
                SampleFormat::U8,
                mode,
                border,
            )
            .unwrap();

            for row in dest.chunks(stride) {
                // The generated samples never reach 0xEE
                assert!(row[..width].iter().all(|&value| value != 0xEE), "{mode}");
                assert!(row[width..].iter().all(|&value| value == 0xEE), "{mode}");
            }
        }
    }
}
