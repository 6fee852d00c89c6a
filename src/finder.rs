//! Finder pattern drawing.
//!
//! A QR code carries three identical targeting marks near its corners. Each
//! mark is drawn as one compound shape, three concentric rounded rectangles
//! filled in a single even-odd pass, so the middle ring shows through as
//! background without a separate erase step. Ring sizes follow the 7:5:3
//! module proportions the QR specification fixes; the corner treatment is
//! this crate's styling.

use crate::canvas::{Canvas, Color};
use crate::geometry::{Point, Rect, RenderGeometry, RoundRect};

/// Corner radius of the outer ring, in surface units. Zero keeps the outer
/// ring sharp; the inner rings scale whatever base radius is supplied.
pub const FINDER_CORNER_RADIUS: f32 = 0.0;

const MIDDLE_RING_SIZE_RATIO: f32 = 5.0 / 7.0;
const MIDDLE_RING_OFFSET_RATIO: f32 = 1.0 / 7.0;
const MIDDLE_RING_CORNER_SCALE: f32 = 0.5;
const INNER_RING_SIZE_RATIO: f32 = 3.0 / 7.0;
const INNER_RING_OFFSET_RATIO: f32 = 2.0 / 7.0;
const INNER_RING_CORNER_SCALE: f32 = 0.12;

/// The three nested rectangles of one finder mark, outermost first.
///
/// `extent` is the side of the outer square, i.e. seven module cells. Offsets
/// and sizes of the inner rings are fractions of it, so the mark scales with
/// the surface while keeping its proportions.
pub fn finder_shape(anchor: Point, extent: f32, corner_radius: f32) -> [RoundRect; 3] {
    let ring = |offset_ratio: f32, size_ratio: f32, corner_scale: f32| {
        RoundRect::new(
            Rect::new(
                anchor.x + extent * offset_ratio,
                anchor.y + extent * offset_ratio,
                extent * size_ratio,
                extent * size_ratio,
            ),
            corner_radius * corner_scale,
        )
    };
    [
        ring(0.0, 1.0, 1.0),
        ring(
            MIDDLE_RING_OFFSET_RATIO,
            MIDDLE_RING_SIZE_RATIO,
            MIDDLE_RING_CORNER_SCALE,
        ),
        ring(
            INNER_RING_OFFSET_RATIO,
            INNER_RING_SIZE_RATIO,
            INNER_RING_CORNER_SCALE,
        ),
    ]
}

/// Draws the three finder patterns at the planned anchors, one compound
/// even-odd shape per mark.
pub fn draw_finders<C: Canvas>(canvas: &mut C, geometry: &RenderGeometry, foreground: Color) {
    for anchor in geometry.finder_anchors() {
        let shape = finder_shape(anchor, geometry.finder_extent, FINDER_CORNER_RADIUS);
        canvas.fill_shape(&shape, foreground);
    }
}
