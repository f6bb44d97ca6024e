//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A job must render at least one symbol
    #[error("empty job: at least one symbol is required")]
    EmptyJob,

    /// Symbols of one job disagree in size
    #[error(
        "symbol {index} is {}x{} modules, expected {}x{}",
        found.0, found.1, expected.0, expected.1
    )]
    GeometryMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Dark modules present but no lines were produced for them
    #[error("matrix has {dark} dark modules but no path segments were produced")]
    EncodingMismatch { dark: usize },
}

impl LayoutError {
    /// Create a geometry mismatch error
    pub fn mismatch(index: usize, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::GeometryMismatch {
            index,
            expected,
            found,
        }
    }
}
