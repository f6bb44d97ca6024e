//! QR Illustrator - QR Codes and Micro QR Codes as compact vector paths
//!
//! This library turns the module matrices of one or more QR symbols into
//! minimal path data and places the symbols side by side, ready to be
//! inserted into a drawing or written out as SVG.
//!
//! # Example
//!
//! ```rust
//! use qr_illustrator::{render, QrOptions};
//!
//! let svg = render(&QrOptions::new("HELLO")).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod layout;
pub mod logging;
pub mod options;
pub mod renderer;
pub mod symbol;

pub use error::ConfigError;
pub use layout::{LayoutConfig, LayoutError, LayoutResult, Node};
pub use options::{EncodePlan, QrOptions};
pub use renderer::{build_path, render_svg, SvgConfig};
pub use symbol::{
    EncodeError, EncodeRequest, ErrorLevel, MicroMode, ModuleMatrix, QrcodeSource, Symbol,
    SymbolSource, SymbolVersion, VersionSelector,
};

use thiserror::Error;

use crate::layout::SymbolGeometry;
use crate::symbol::{border_for, geometry_for};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid options
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The symbol source could not produce the symbols
    #[error("{0}")]
    Encode(#[from] EncodeError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }
}

/// Run an encode plan against a symbol source
///
/// Sequence symbols that declare their structured-append position are
/// returned in ascending position order. A declared sequence length must
/// match the number of symbols the source delivered.
pub fn encode_symbols<S: SymbolSource>(
    source: &S,
    plan: &EncodePlan,
) -> Result<Vec<Symbol>, EncodeError> {
    match plan {
        EncodePlan::Single(request) => Ok(vec![source.encode(request)?]),
        EncodePlan::Sequence {
            request,
            symbol_count,
        } => {
            let mut symbols = source.encode_sequence(request, *symbol_count)?;
            if let Some(position) = symbols
                .iter()
                .filter_map(|s| s.sequence)
                .find(|p| p.total != symbols.len())
            {
                return Err(EncodeError::rejected(format!(
                    "symbol {} declares a sequence of {}, but {} symbols were produced",
                    position.index,
                    position.total,
                    symbols.len()
                )));
            }
            symbols.sort_by_key(|s| s.sequence.map(|p| p.index));
            Ok(symbols)
        }
    }
}

/// Shared geometry of a job, derived from its first symbol
pub fn job_geometry(first: &Symbol) -> SymbolGeometry {
    let border = border_for(first.version);
    let (width, height) = geometry_for(first.version, border);
    SymbolGeometry::new(border, width, height)
}

/// Encode and lay out a job without serializing it
///
/// # Example
///
/// ```rust
/// use qr_illustrator::{render_job, QrOptions, QrcodeSource};
///
/// let options = QrOptions::new("HELLO").with_anchor(10.0, 20.0);
/// let result = render_job(&QrcodeSource, &options).unwrap();
/// assert_eq!(result.transform.to_string(), "translate(10.0, 20.0)");
/// assert!(result.symbols[0].path.starts_with("M4 4.5h7"));
/// ```
pub fn render_job<S: SymbolSource>(
    source: &S,
    options: &QrOptions,
) -> Result<LayoutResult, RenderError> {
    let plan = options.plan()?;
    let symbols = encode_symbols(source, &plan)?;
    let first = symbols.first().ok_or(LayoutError::EmptyJob)?;
    let geometry = job_geometry(first);
    tracing::debug!(
        version = %first.version,
        count = symbols.len(),
        border = geometry.border,
        width = geometry.width,
        "encoded symbols"
    );

    let matrices: Vec<ModuleMatrix> = symbols.into_iter().map(|s| s.matrix).collect();
    let result = layout::compute(&matrices, geometry, &options.layout_config())?;
    tracing::info!(symbols = result.symbols.len(), "laid out QR symbols");
    Ok(result)
}

/// Render options to SVG with the default symbol source and configuration
pub fn render(options: &QrOptions) -> Result<String, RenderError> {
    render_with_config(&QrcodeSource, options, RenderConfig::default())
}

/// Render options to SVG with a custom symbol source and configuration
///
/// # Example
///
/// ```rust
/// use qr_illustrator::{render_with_config, QrOptions, QrcodeSource, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::new().with_standalone(false));
/// let svg = render_with_config(&QrcodeSource, &QrOptions::new("HELLO"), config).unwrap();
/// assert!(svg.starts_with("<g"));
/// ```
pub fn render_with_config<S: SymbolSource>(
    source: &S,
    options: &QrOptions,
    config: RenderConfig,
) -> Result<String, RenderError> {
    let result = render_job(source, options)?;
    Ok(render_svg(&result, &config.svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_symbol() {
        let svg = render(&QrOptions::new("HELLO")).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 29 29""#));
        assert!(svg.contains(r#"<path d="M4 4.5h7"#));
    }

    #[test]
    fn test_render_with_background() {
        let svg = render(&QrOptions::new("HELLO").with_background(true)).unwrap();
        assert!(svg.contains(r##"<rect width="29" height="29" x="0" fill="#FFF"/>"##));
    }

    #[test]
    fn test_render_scaled() {
        let svg = render(&QrOptions::new("HELLO").with_scale(2.5)).unwrap();
        assert!(svg.contains("scale(2.500000)"));
    }

    #[test]
    fn test_render_invalid_scale() {
        let err = render(&QrOptions::new("HELLO").with_scale(-1.0)).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_sequence_unsupported_by_default_source() {
        let err = render(&QrOptions::new("HELLO").with_symbol_count(2)).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Encode(EncodeError::Unsupported { .. })
        ));
    }

    /// Source whose sequences claim a different length than they have
    struct TruncatingSource;

    impl SymbolSource for TruncatingSource {
        fn encode(&self, _request: &EncodeRequest) -> Result<Symbol, EncodeError> {
            Err(EncodeError::rejected("single symbols not expected"))
        }

        fn encode_sequence(
            &self,
            _request: &EncodeRequest,
            symbol_count: usize,
        ) -> Result<Vec<Symbol>, EncodeError> {
            let matrix = ModuleMatrix::from_rows(vec![vec![true; 21]; 21])?;
            Ok(vec![
                Symbol::new(matrix, SymbolVersion::Normal(1)).with_sequence(0, symbol_count)
            ])
        }
    }

    #[test]
    fn test_sequence_length_must_match_declared_total() {
        let plan = QrOptions::new("HELLO").with_symbol_count(3).plan().unwrap();
        let err = encode_symbols(&TruncatingSource, &plan).unwrap_err();
        assert_eq!(
            err.to_string(),
            "encoding rejected: symbol 0 declares a sequence of 3, but 1 symbols were produced"
        );
    }

    #[test]
    fn test_job_geometry() {
        let matrix = ModuleMatrix::from_rows(vec![vec![false; 11]; 11]).unwrap();
        let symbol = Symbol::new(matrix, SymbolVersion::Micro(1));
        assert_eq!(job_geometry(&symbol), SymbolGeometry::new(2, 15, 15));
    }
}
