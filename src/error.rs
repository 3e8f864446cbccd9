use thiserror::Error;

/// Errors raised while resolving a plane's configuration.
///
/// These are all detected before any pixel is read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid mode {0}, must be between -2 and 8")]
    InvalidMode(i64),
    #[error("the undefined mode must be resolved before a plane can be processed")]
    UndefinedMode,
    #[error("unsupported sample format: {bits}-bit {kind}")]
    UnsupportedFormat { kind: &'static str, bits: u8 },
    #[error("invalid value for 'border', must be 0 or 1, got {0}")]
    InvalidBorder(i64),
    #[error("invalid value for 'opt', must be between -1 and 2, got {0}")]
    InvalidOpt(i64),
}

/// Errors raised when a plane's buffers cannot hold the requested geometry.
///
/// The destination buffer is never written when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("plane width must be positive")]
    ZeroWidth,
    #[error("plane height must be positive")]
    ZeroHeight,
    #[error("stride of {stride} bytes cannot hold a row of {row_bytes} bytes")]
    StrideTooSmall { stride: usize, row_bytes: usize },
    #[error("buffer of {len} bytes is smaller than the {required} bytes the plane needs")]
    BufferTooSmall { len: usize, required: usize },
    #[error("buffer or stride is not aligned to the {sample_size}-byte sample size")]
    Misaligned { sample_size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
