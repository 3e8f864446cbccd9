#[cfg(test)]
mod tests;

use std::fmt;

use bitflags::bitflags;

use crate::{error::ConfigError, simd::SimdTier};

/// Pixel-combination algorithm applied to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Sentinel for a plane whose mode was not given. It inherits the mode of
    /// the previous plane and can never be dispatched.
    Undefined = -2,
    /// The plane is not processed. At the plane boundary this is an identity copy.
    Skip = -1,
    Copy = 0,
    /// Median of the pixel and its vertical neighbors.
    VerticalMedian = 1,
    /// Vertical median whose bounds are widened by the linear trend of the two
    /// pixels above and the two pixels below. The trend saturates to the
    /// sample range for integers and is unbounded for floats.
    RelaxedVerticalMedian = 2,
    /// Clip to the minimum and maximum of the 8 neighbors.
    Clamp = 3,
    /// Clip to the second smallest and second largest neighbor.
    ClampSecond = 4,
    /// Clip to the third smallest and third largest neighbor.
    ClampThird = 5,
    /// Clip to the fourth and fifth neighbor, the median of all 9 pixels.
    Median = 6,
    /// Clip against each opposing neighbor pair and keep the result closest
    /// to the original pixel.
    LineClip = 7,
    /// Median of the 8 neighbors, the center excluded.
    NeighborMedian = 8,
}

impl Mode {
    /// Whether this mode runs a kernel, as opposed to passing samples through.
    #[must_use]
    pub fn is_filtering(self) -> bool {
        !matches!(self, Self::Undefined | Self::Skip | Self::Copy)
    }
}

impl TryFrom<i64> for Mode {
    type Error = ConfigError;

    fn try_from(val: i64) -> Result<Self, Self::Error> {
        Ok(match val {
            -2 => Self::Undefined,
            -1 => Self::Skip,
            0 => Self::Copy,
            1 => Self::VerticalMedian,
            2 => Self::RelaxedVerticalMedian,
            3 => Self::Clamp,
            4 => Self::ClampSecond,
            5 => Self::ClampThird,
            6 => Self::Median,
            7 => Self::LineClip,
            8 => Self::NeighborMedian,
            _ => return Err(ConfigError::InvalidMode(val)),
        })
    }
}

impl From<Mode> for i64 {
    fn from(value: Mode) -> Self {
        value as i64
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", *self as i64, self)
    }
}

/// Sample representation of a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    U8,
    /// 9 to 16 significant bits stored in 16-bit samples.
    U16 { bits: u8 },
    F32,
}

impl SampleFormat {
    pub fn new(float: bool, bits: u8) -> Result<Self, ConfigError> {
        match (float, bits) {
            (false, 8) => Ok(Self::U8),
            (false, 9..=16) => Ok(Self::U16 { bits }),
            (true, 32) => Ok(Self::F32),
            (false, _) => Err(ConfigError::UnsupportedFormat {
                kind: "integer",
                bits,
            }),
            (true, _) => Err(ConfigError::UnsupportedFormat {
                kind: "float",
                bits,
            }),
        }
    }

    #[must_use]
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 { .. } => 2,
            Self::F32 => 4,
        }
    }

    #[must_use]
    pub fn bits_per_sample(self) -> u8 {
        match self {
            Self::U8 => 8,
            Self::U16 { bits } => bits,
            Self::F32 => 32,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32 => write!(f, "32-bit float"),
            _ => write!(f, "{}-bit integer", self.bits_per_sample()),
        }
    }
}

/// What happens to pixels whose window reaches outside the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderPolicy {
    /// Border pixels are copied from the source unchanged.
    #[default]
    Copy = 0,
    /// Out-of-range neighbors are replaced by the nearest in-range sample and
    /// the kernel runs on the resulting window.
    Clamp = 1,
}

impl TryFrom<i64> for BorderPolicy {
    type Error = ConfigError;

    fn try_from(val: i64) -> Result<Self, Self::Error> {
        Ok(match val {
            0 => Self::Copy,
            1 => Self::Clamp,
            _ => return Err(ConfigError::InvalidBorder(val)),
        })
    }
}

/// Parses the `opt` argument. `-1` means "best the CPU supports".
pub fn parse_opt(val: i64) -> Result<Option<SimdTier>, ConfigError> {
    Ok(match val {
        -1 => None,
        0 => Some(SimdTier::Scalar),
        1 => Some(SimdTier::Sse2),
        2 => Some(SimdTier::Sse41),
        _ => return Err(ConfigError::InvalidOpt(val)),
    })
}

bitflags! {
    /// Planes that run a kernel. The others are passed through.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlaneSet: u8 {
        const Y = 0x01;
        const U = 0x02;
        const V = 0x04;
    }
}

impl PlaneSet {
    #[must_use]
    pub fn plane(index: usize) -> Self {
        match index {
            0 => Self::Y,
            1 => Self::U,
            2 => Self::V,
            _ => Self::empty(),
        }
    }
}

/// Resolves the per-plane modes given to the filter.
///
/// A missing or undefined chroma mode inherits from the plane before it, so
/// `modeu` falls back to `mode` and `modev` falls back to the resolved `modeu`.
pub fn resolve_plane_modes(
    mode: i64,
    mode_u: Option<i64>,
    mode_v: Option<i64>,
) -> Result<[Mode; 3], ConfigError> {
    let mode_y = Mode::try_from(mode)?;
    if mode_y == Mode::Undefined {
        return Err(ConfigError::UndefinedMode);
    }

    let inherit = |value: Option<i64>, previous: Mode| -> Result<Mode, ConfigError> {
        match value.map(Mode::try_from).transpose()? {
            None | Some(Mode::Undefined) => Ok(previous),
            Some(mode) => Ok(mode),
        }
    };

    let mode_u = inherit(mode_u, mode_y)?;
    let mode_v = inherit(mode_v, mode_u)?;
    Ok([mode_y, mode_u, mode_v])
}
