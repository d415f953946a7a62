//! Error type for map queries and construction

use thiserror::Error;

/// Error type for map construction and coordinate queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} layer grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("layer cell buffer holds {actual} cells, expected width*height = {expected}")]
    LayerSizeMismatch { expected: usize, actual: usize },
}
