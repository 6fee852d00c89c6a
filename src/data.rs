//! Data module drawing.
//!
//! The area outside the three finder corners splits into three row/column
//! aligned bands that tile the rest of the grid. Every dark bit inside a band
//! becomes one filled cell; light bits draw nothing because the background
//! pass already painted them.

use std::ops::Range;

use crate::canvas::{Canvas, Color};
use crate::geometry::{RenderGeometry, FINDER_MODULE_SPAN};
use crate::matrix::BitMatrix;

/// A rectangular run of modules, addressed in module units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRegion {
    pub cols: Range<usize>,
    pub rows: Range<usize>,
}

/// The three bands of data modules for an `n`-module grid.
///
/// Together with the three 7x7 finder corners the bands tile the grid
/// exactly: every module belongs to precisely one band or one finder corner.
pub fn data_regions(n: usize) -> [ModuleRegion; 3] {
    let f = FINDER_MODULE_SPAN;
    assert!(
        n >= 2 * f,
        "a {n} module matrix cannot hold three finder patterns"
    );
    [
        // Between the top-left and top-right finder patterns.
        ModuleRegion {
            cols: f..n - f,
            rows: 0..f,
        },
        // Full width band between the top finders and the bottom-left one.
        ModuleRegion {
            cols: 0..n,
            rows: f..n - f,
        },
        // To the right of the bottom-left finder pattern.
        ModuleRegion {
            cols: f..n,
            rows: n - f..n,
        },
    ]
}

/// Fills one cell per dark bit across the three data bands.
///
/// Bits inside the finder corners are never consulted; those marks are drawn
/// as fixed shapes whatever the underlying modules say.
pub fn draw_data_modules<C: Canvas>(
    canvas: &mut C,
    matrix: &BitMatrix,
    geometry: &RenderGeometry,
    foreground: Color,
) {
    for ModuleRegion { cols, rows } in data_regions(matrix.size()) {
        for row in rows {
            for col in cols.clone() {
                if matrix.get(col, row) {
                    canvas.fill_rect(geometry.cell_rect(col, row), foreground);
                }
            }
        }
    }
}
