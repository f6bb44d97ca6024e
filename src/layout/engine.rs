//! Layout of one or more symbols side by side
//!
//! Symbols are placed left to right in input order. Each one advances the
//! running offset by its width plus one border, so neighbouring symbols
//! keep a visible gap even when their quiet zones are not drawn.

use crate::renderer::path::build_path;
use crate::symbol::ModuleMatrix;

use super::{
    BackgroundRect, BoundingBox, LayoutConfig, LayoutError, LayoutResult, SymbolGeometry,
    SymbolLayout, Transform,
};

/// Compute offsets, backgrounds, path data and the group transform for a job
///
/// All matrices must share the dimensions of the first one.
pub fn compute(
    matrices: &[ModuleMatrix],
    geometry: SymbolGeometry,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let first = matrices.first().ok_or(LayoutError::EmptyJob)?;
    let expected = first.dimensions();
    if let Some((index, m)) = matrices
        .iter()
        .enumerate()
        .find(|(_, m)| m.dimensions() != expected)
    {
        return Err(LayoutError::mismatch(index, expected, m.dimensions()));
    }

    let mut symbols = Vec::with_capacity(matrices.len());
    let mut offset = 0.0;
    for matrix in matrices {
        let background = config.background.then_some(BackgroundRect {
            x: offset,
            width: geometry.width,
            height: geometry.height,
        });
        let path = build_path(matrix, geometry.border, offset)?;
        symbols.push(SymbolLayout {
            offset,
            background,
            path,
        });
        offset += geometry.advance();
    }

    let count = symbols.len() as f64;
    let extent = count * f64::from(geometry.width) + (count - 1.0) * f64::from(geometry.border);
    let bounds = BoundingBox::new(
        config.anchor.x,
        config.anchor.y,
        extent * config.scale,
        f64::from(geometry.height) * config.scale,
    );

    Ok(LayoutResult {
        transform: Transform::new(config.anchor, config.scale),
        geometry,
        symbols,
        bounds,
    })
}
