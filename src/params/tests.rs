#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;

#[test]
fn mode_from_integer() {
    assert_eq!(Mode::try_from(-2).unwrap(), Mode::Undefined);
    assert_eq!(Mode::try_from(-1).unwrap(), Mode::Skip);
    assert_eq!(Mode::try_from(0).unwrap(), Mode::Copy);
    assert_eq!(Mode::try_from(2).unwrap(), Mode::RelaxedVerticalMedian);
    assert_eq!(Mode::try_from(6).unwrap(), Mode::Median);
    assert_eq!(Mode::try_from(8).unwrap(), Mode::NeighborMedian);

    assert_eq!(Mode::try_from(9), Err(ConfigError::InvalidMode(9)));
    assert_eq!(Mode::try_from(-3), Err(ConfigError::InvalidMode(-3)));
}

#[quickcheck]
fn mode_integer_conversion_is_lossless(value: i64) -> TestResult {
    match Mode::try_from(value) {
        Ok(mode) => TestResult::from_bool(i64::from(mode) == value),
        Err(error) => TestResult::from_bool(
            !(-2..=8).contains(&value) && error == ConfigError::InvalidMode(value),
        ),
    }
}

#[test]
fn mode_display() {
    assert_eq!(Mode::NeighborMedian.to_string(), "8 (NeighborMedian)");
    assert_eq!(Mode::Skip.to_string(), "-1 (Skip)");
}

#[test]
fn filtering_modes() {
    assert!(!Mode::Undefined.is_filtering());
    assert!(!Mode::Skip.is_filtering());
    assert!(!Mode::Copy.is_filtering());
    assert!(Mode::VerticalMedian.is_filtering());
    assert!(Mode::NeighborMedian.is_filtering());
}

#[test]
fn sample_formats() {
    assert_eq!(SampleFormat::new(false, 8).unwrap(), SampleFormat::U8);
    assert_eq!(
        SampleFormat::new(false, 10).unwrap(),
        SampleFormat::U16 { bits: 10 }
    );
    assert_eq!(
        SampleFormat::new(false, 16).unwrap(),
        SampleFormat::U16 { bits: 16 }
    );
    assert_eq!(SampleFormat::new(true, 32).unwrap(), SampleFormat::F32);

    assert_eq!(
        SampleFormat::new(true, 16),
        Err(ConfigError::UnsupportedFormat {
            kind: "float",
            bits: 16
        })
    );
    assert_eq!(
        SampleFormat::new(false, 32),
        Err(ConfigError::UnsupportedFormat {
            kind: "integer",
            bits: 32
        })
    );
    assert!(SampleFormat::new(false, 7).is_err());

    assert_eq!(SampleFormat::U16 { bits: 12 }.bytes_per_sample(), 2);
    assert_eq!(SampleFormat::F32.bytes_per_sample(), 4);
    assert_eq!(SampleFormat::U16 { bits: 12 }.to_string(), "12-bit integer");
    assert_eq!(SampleFormat::F32.to_string(), "32-bit float");
}

#[test]
fn border_and_opt_values() {
    assert_eq!(BorderPolicy::try_from(0).unwrap(), BorderPolicy::Copy);
    assert_eq!(BorderPolicy::try_from(1).unwrap(), BorderPolicy::Clamp);
    assert_eq!(BorderPolicy::try_from(2), Err(ConfigError::InvalidBorder(2)));

    assert_eq!(parse_opt(-1).unwrap(), None);
    assert_eq!(parse_opt(0).unwrap(), Some(SimdTier::Scalar));
    assert_eq!(parse_opt(2).unwrap(), Some(SimdTier::Sse41));
    assert_eq!(parse_opt(3), Err(ConfigError::InvalidOpt(3)));
}

#[test]
fn chroma_modes_inherit() {
    assert_eq!(
        resolve_plane_modes(4, None, None).unwrap(),
        [Mode::ClampSecond; 3]
    );
    assert_eq!(
        resolve_plane_modes(1, Some(0), None).unwrap(),
        [Mode::VerticalMedian, Mode::Copy, Mode::Copy]
    );
    assert_eq!(
        resolve_plane_modes(1, Some(-2), Some(7)).unwrap(),
        [Mode::VerticalMedian, Mode::VerticalMedian, Mode::LineClip]
    );
    assert_eq!(
        resolve_plane_modes(1, Some(8), Some(-2)).unwrap(),
        [Mode::VerticalMedian, Mode::NeighborMedian, Mode::NeighborMedian]
    );
    assert_eq!(
        resolve_plane_modes(-1, None, Some(3)).unwrap(),
        [Mode::Skip, Mode::Skip, Mode::Clamp]
    );
}

#[test]
fn plane_modes_are_validated() {
    assert_eq!(
        resolve_plane_modes(-2, None, None),
        Err(ConfigError::UndefinedMode)
    );
    assert_eq!(
        resolve_plane_modes(12, None, None),
        Err(ConfigError::InvalidMode(12))
    );
    assert_eq!(
        resolve_plane_modes(1, Some(9), None),
        Err(ConfigError::InvalidMode(9))
    );
    assert_eq!(
        resolve_plane_modes(1, None, Some(-5)),
        Err(ConfigError::InvalidMode(-5))
    );
}

#[test]
fn plane_set_indices() {
    assert_eq!(PlaneSet::plane(0), PlaneSet::Y);
    assert_eq!(PlaneSet::plane(2), PlaneSet::V);
    assert_eq!(PlaneSet::plane(3), PlaneSet::empty());

    let planes = PlaneSet::plane(0) | PlaneSet::plane(2);
    assert!(planes.contains(PlaneSet::V));
    assert!(!planes.contains(PlaneSet::U));
}
