// Errors raised while validating generation inputs.
// Once validation passes no stage can fail.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    // Zero-sized grid, a side too large for the random stream, or an area overflowing usize
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    // A config knob out of its domain, e.g. min_radius > max_radius
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Label outside 0..=8
    #[error("unknown npc label {0}")]
    UnknownLabel(u8),
}

pub type Result<T> = std::result::Result<T, GenError>;
