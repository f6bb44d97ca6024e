//! Symbol source: the encoder seam and the data it produces
//!
//! The renderer never encodes data itself. It asks a [`SymbolSource`] for
//! finished module matrices and derives border and geometry from the
//! declared version.

pub mod encoder;
pub mod matrix;
pub mod version;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::ConfigError;

pub use encoder::QrcodeSource;
pub use matrix::{matrix_to_lines, Line, Lines, MatrixError, ModuleMatrix};
pub use version::{border_for, geometry_for, SymbolVersion, VersionSelector};

/// Errors reported by a symbol source
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The data does not fit the requested version / error level / Micro combination
    #[error("encoding rejected: {reason}")]
    Rejected { reason: String },

    /// The source cannot produce what was asked for
    #[error("{feature} is not supported by this symbol source")]
    Unsupported { feature: String },

    /// The encoder produced a matrix that could not be read back
    #[error("malformed symbol matrix: {0}")]
    Matrix(#[from] MatrixError),
}

impl EncodeError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }
}

/// Error correction level, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorLevel {
    L,
    M,
    Q,
    H,
}

impl ErrorLevel {
    /// All levels, strongest first
    pub const DESCENDING: [ErrorLevel; 4] = [Self::H, Self::Q, Self::M, Self::L];
}

impl FromStr for ErrorLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(ConfigError::invalid(
                "error",
                format!("unknown error correction level '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

/// Whether Micro QR versions may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MicroMode {
    /// Only standard QR versions
    #[default]
    Never,
    /// Automatic selection may pick a Micro version
    Allow,
    /// Only Micro versions
    Always,
}

/// Everything a symbol source needs to produce one symbol or a sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodeRequest {
    pub data: String,
    /// `None` selects the smallest fitting version
    pub version: Option<SymbolVersion>,
    pub error: Option<ErrorLevel>,
    pub micro: MicroMode,
    /// Raise the error level as long as the version stays the same
    pub boost_error: bool,
    /// Character encoding hint for byte-mode data
    pub encoding: Option<String>,
}

/// Position of a symbol inside a structured-append sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePosition {
    /// Zero-based index
    pub index: usize,
    pub total: usize,
}

/// A finished symbol as delivered by a source
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub matrix: ModuleMatrix,
    pub version: SymbolVersion,
    pub error: Option<ErrorLevel>,
    pub sequence: Option<SequencePosition>,
}

impl Symbol {
    pub fn new(matrix: ModuleMatrix, version: SymbolVersion) -> Self {
        Self {
            matrix,
            version,
            error: None,
            sequence: None,
        }
    }

    pub fn with_error(mut self, error: Option<ErrorLevel>) -> Self {
        self.error = error;
        self
    }

    pub fn with_sequence(mut self, index: usize, total: usize) -> Self {
        self.sequence = Some(SequencePosition { index, total });
        self
    }
}

/// An encoder producing finished module matrices
pub trait SymbolSource {
    /// Encode `request` into a single symbol
    fn encode(&self, request: &EncodeRequest) -> Result<Symbol, EncodeError>;

    /// Encode `request` into a structured-append sequence of `symbol_count` symbols
    fn encode_sequence(
        &self,
        request: &EncodeRequest,
        symbol_count: usize,
    ) -> Result<Vec<Symbol>, EncodeError> {
        let _ = (request, symbol_count);
        Err(EncodeError::unsupported("structured append"))
    }
}

impl<S: SymbolSource + ?Sized> SymbolSource for &S {
    fn encode(&self, request: &EncodeRequest) -> Result<Symbol, EncodeError> {
        (**self).encode(request)
    }

    fn encode_sequence(
        &self,
        request: &EncodeRequest,
        symbol_count: usize,
    ) -> Result<Vec<Symbol>, EncodeError> {
        (**self).encode_sequence(request, symbol_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SingleOnly;

    impl SymbolSource for SingleOnly {
        fn encode(&self, _request: &EncodeRequest) -> Result<Symbol, EncodeError> {
            Err(EncodeError::rejected("nothing fits"))
        }
    }

    #[test]
    fn test_error_level_parse_and_order() {
        assert_eq!("q".parse::<ErrorLevel>().unwrap(), ErrorLevel::Q);
        assert!("X".parse::<ErrorLevel>().is_err());
        assert!(ErrorLevel::L < ErrorLevel::H);
        assert_eq!(ErrorLevel::DESCENDING[0], ErrorLevel::H);
    }

    #[test]
    fn test_sequence_unsupported_by_default() {
        let err = SingleOnly
            .encode_sequence(&EncodeRequest::default(), 3)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Unsupported { .. }));
        assert!(err.to_string().contains("structured append"));
    }

    #[test]
    fn test_rejected_display() {
        let err = SingleOnly.encode(&EncodeRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), "encoding rejected: nothing fits");
    }
}
