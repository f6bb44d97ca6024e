//! Module matrices and their decomposition into horizontal lines

use thiserror::Error;

use crate::layout::Point;

/// Errors raised while building a module matrix
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("row {row} has {found} modules, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} modules, found {found}")]
    ModuleCount { expected: usize, found: usize },
}

/// An immutable grid of dark (`true`) and light (`false`) modules
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleMatrix {
    width: usize,
    height: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Build a matrix from rows; every row must have the same length
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, MatrixError>
    where
        R: AsRef<[bool]>,
    {
        let mut width = None;
        let mut height = 0;
        let mut modules = Vec::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let cells = cells.as_ref();
            let expected = *width.get_or_insert(cells.len());
            if cells.len() != expected {
                return Err(MatrixError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            modules.extend_from_slice(cells);
            height += 1;
        }
        Ok(Self {
            width: width.unwrap_or(0),
            height,
            modules,
        })
    }

    /// Build a square matrix from a row-major module vector
    pub(crate) fn from_square(side: usize, modules: Vec<bool>) -> Result<Self, MatrixError> {
        if modules.len() != side * side {
            return Err(MatrixError::ModuleCount {
                expected: side * side,
                found: modules.len(),
            });
        }
        Ok(Self {
            width: side,
            height: side,
            modules,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in modules
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Module state at `(row, col)`; out-of-range positions are light
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.modules[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.modules[row * self.width..(row + 1) * self.width]
    }

    pub fn has_dark_modules(&self) -> bool {
        self.modules.iter().any(|&m| m)
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// A horizontal run of dark modules: start and end point on the same row
pub type Line = (Point, Point);

/// Lazy row-by-row decomposition of a matrix into maximal dark runs
///
/// Created by [`matrix_to_lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    matrix: &'a ModuleMatrix,
    origin: Point,
    row: usize,
    col: usize,
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        while self.row < self.matrix.height() {
            let cells = self.matrix.row(self.row);
            while self.col < cells.len() && !cells[self.col] {
                self.col += 1;
            }
            if self.col < cells.len() {
                let start = self.col;
                while self.col < cells.len() && cells[self.col] {
                    self.col += 1;
                }
                let y = self.origin.y + self.row as f64;
                return Some((
                    Point::new(self.origin.x + start as f64, y),
                    Point::new(self.origin.x + self.col as f64, y),
                ));
            }
            self.row += 1;
            self.col = 0;
        }
        None
    }
}

/// Decompose `matrix` into horizontal lines of dark modules, placing the
/// top-left module at `(x, y)` with one unit per module.
pub fn matrix_to_lines(matrix: &ModuleMatrix, x: f64, y: f64) -> Lines<'_> {
    Lines {
        matrix,
        origin: Point::new(x, y),
        row: 0,
        col: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&str]) -> ModuleMatrix {
        ModuleMatrix::from_rows(
            rows.iter()
                .map(|r| r.chars().map(|c| c == '#').collect::<Vec<_>>()),
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ModuleMatrix::from_rows([vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_dimensions() {
        let m = matrix(&["#..", "..#"]);
        assert_eq!(m.dimensions(), (3, 2));
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(0, 1));
        assert!(m.is_dark(1, 2));
        assert!(!m.is_dark(5, 5));
    }

    #[test]
    fn test_lines_merge_runs() {
        let m = matrix(&["##.#", "....", ".###"]);
        let lines: Vec<_> = matrix_to_lines(&m, 1.0, 0.5).collect();
        assert_eq!(
            lines,
            vec![
                (Point::new(1.0, 0.5), Point::new(3.0, 0.5)),
                (Point::new(4.0, 0.5), Point::new(5.0, 0.5)),
                (Point::new(2.0, 2.5), Point::new(5.0, 2.5)),
            ]
        );
    }

    #[test]
    fn test_lines_empty_for_light_matrix() {
        let m = matrix(&["...", "..."]);
        assert_eq!(matrix_to_lines(&m, 0.0, 0.0).count(), 0);
        assert!(!m.has_dark_modules());
    }

    #[test]
    fn test_lines_on_empty_matrix() {
        let m = ModuleMatrix::from_rows(Vec::<Vec<bool>>::new()).unwrap();
        assert_eq!(m.dimensions(), (0, 0));
        assert_eq!(matrix_to_lines(&m, 0.0, 0.0).count(), 0);
    }
}
