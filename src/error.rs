//! Error type shared by the whole crate
//!
//! Every fallible operation (shape construction, allocation, dataset
//! validation, IDX parsing and configuration loading) reports through
//! [`Error`]. Nothing in the library terminates the process; the binary
//! decides what to do with a failure.

/// Errors produced by network construction, training and data loading.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The layer list was empty or contained a zero width, or the input
    /// dimension was zero.
    #[error("invalid network shape: {0}")]
    InvalidShape(String),

    /// Image and label collections do not describe the same examples.
    #[error("got {images} images but {labels} labels")]
    CountMismatch { images: usize, labels: usize },

    /// Image geometry does not match the network input dimension.
    #[error("images provided have {actual} pixels, but network has {expected} inputs")]
    InputDimMismatch { expected: usize, actual: usize },

    /// A label has no corresponding output neuron.
    #[error("label {label} is out of range for a network with {classes} outputs")]
    LabelOutOfRange { label: u8, classes: usize },

    /// Training needs at least one example to sample from.
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    /// A scalar buffer could not be reserved.
    #[error("failed to allocate {len} scalars")]
    Allocation { len: usize },

    /// An IDX file started with the wrong magic number.
    #[error("incorrect magic number {found:#010x}, expected {expected:#010x}")]
    BadMagic { expected: u32, found: u32 },

    /// An IDX file ended before its header or payload was complete.
    #[error("truncated input: {0}")]
    Truncated(&'static str),

    /// A buffer length computed from layer widths or image geometry does not
    /// fit in `usize`.
    #[error("{0} size overflows the address space")]
    SizeOverflow(&'static str),

    /// A raw image buffer does not hold `count * width * height` bytes.
    #[error("image buffer holds {actual} bytes, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid JSON for [`crate::config::TrainingConfig`].
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Underlying file I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
