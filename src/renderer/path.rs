//! Path data for the dark modules of a symbol
//!
//! Every horizontal run of dark modules becomes one stroke of width 1. The
//! first stroke uses an absolute move, every following stroke moves
//! relative to the end of the previous one, which keeps the output short.

use std::fmt::Write;

use crate::layout::LayoutError;
use crate::symbol::{matrix_to_lines, Line, ModuleMatrix};

/// Vertical offset that centers a 1-unit stroke on its module row
const STROKE_CENTER: f64 = 0.5;

/// Build the `d` attribute for the dark modules of `matrix`
///
/// The top-left module sits at `(border + offset, border)`. An all-light
/// matrix yields an empty string.
pub fn build_path(matrix: &ModuleMatrix, border: u32, offset: f64) -> Result<String, LayoutError> {
    let x = f64::from(border) + offset;
    let y = f64::from(border) + STROKE_CENTER;
    path_for_lines(matrix, matrix_to_lines(matrix, x, y))
}

/// Build the `d` attribute from an already decomposed `matrix`
///
/// Fails with [`LayoutError::EncodingMismatch`] when `lines` is empty
/// although the matrix holds dark modules.
pub fn path_for_lines(
    matrix: &ModuleMatrix,
    lines: impl IntoIterator<Item = Line>,
) -> Result<String, LayoutError> {
    let d = lines_to_path(lines);
    if d.is_empty() && matrix.has_dark_modules() {
        return Err(LayoutError::EncodingMismatch {
            dark: matrix.dark_count(),
        });
    }
    Ok(d)
}

/// Join a sequence of lines into path commands
///
/// The vertical delta of relative moves is truncated to an integer since
/// rows are integer-spaced.
pub fn lines_to_path(lines: impl IntoIterator<Item = Line>) -> String {
    let mut lines = lines.into_iter();
    let Some((start, end)) = lines.next() else {
        return String::new();
    };

    let mut d = String::new();
    // Writing to a String cannot fail
    let _ = write!(d, "M{} {}h{}", start.x, start.y, end.x - start.x);
    let mut prev = end;
    for (start, end) in lines {
        let dy = (start.y - prev.y).trunc() as i64;
        let _ = write!(d, "m{} {}h{}", start.x - prev.x, dy, end.x - start.x);
        prev = end;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&str]) -> ModuleMatrix {
        ModuleMatrix::from_rows(
            rows.iter()
                .map(|r| r.chars().map(|c| c == '#').collect::<Vec<_>>()),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_matrix_gives_empty_path() {
        let m = matrix(&["...", "...", "..."]);
        assert_eq!(build_path(&m, 4, 0.0).unwrap(), "");
    }

    #[test]
    fn test_missing_lines_for_dark_modules() {
        let m = matrix(&["#.#", "...", ".##"]);
        let err = path_for_lines(&m, std::iter::empty()).unwrap_err();
        assert_eq!(err, LayoutError::EncodingMismatch { dark: 4 });
    }

    #[test]
    fn test_lines_for_light_matrix() {
        let m = matrix(&["..", ".."]);
        assert_eq!(path_for_lines(&m, std::iter::empty()).unwrap(), "");
    }

    #[test]
    fn test_single_module() {
        let m = matrix(&["...", "..#", "..."]);
        assert_eq!(build_path(&m, 4, 0.0).unwrap(), "M6 5.5h1");
    }

    #[test]
    fn test_relative_moves() {
        let m = matrix(&["##.#", "....", ".###"]);
        assert_eq!(build_path(&m, 2, 0.0).unwrap(), "M2 2.5h2m1 0h1m-3 2h3");
    }

    #[test]
    fn test_offset_shifts_only_first_command() {
        let m = matrix(&["#.#", "#.."]);
        let at_zero = build_path(&m, 1, 0.0).unwrap();
        let shifted = build_path(&m, 1, 33.0).unwrap();
        assert_eq!(at_zero, "M1 1.5h1m1 0h1m-3 1h1");
        assert_eq!(shifted, "M34 1.5h1m1 0h1m-3 1h1");
    }

    #[test]
    fn test_fractional_offset_keeps_horizontal_precision() {
        let m = matrix(&["#"]);
        assert_eq!(build_path(&m, 0, 0.25).unwrap(), "M0.25 0.5h1");
    }

    #[test]
    fn test_vertical_delta_is_truncated() {
        let lines = vec![
            (Point::new(0.0, 0.5), Point::new(1.0, 0.5)),
            (Point::new(0.0, 2.25), Point::new(2.0, 2.25)),
        ];
        assert_eq!(lines_to_path(lines), "M0 0.5h1m-1 1h2");
    }

    #[test]
    fn test_deterministic() {
        let m = matrix(&["#.##", ".##.", "#..#"]);
        assert_eq!(build_path(&m, 4, 8.0).unwrap(), build_path(&m, 4, 8.0).unwrap());
    }
}
