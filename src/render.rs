//! Render orchestration.
//!
//! [`QrRenderer`] composes the full picture in a fixed sequence: validate the
//! payload, fetch the bit matrix through the per-instance cache, plan the
//! geometry, then paint background, finder patterns and data modules in that
//! order. Finder marks and data bands cover disjoint areas by construction,
//! so only the background fill is order-sensitive.

use tracing::debug;

use crate::canvas::{Canvas, Color};
use crate::data::draw_data_modules;
use crate::error::RenderError;
use crate::finder::draw_finders;
use crate::geometry::{Rect, RenderGeometry};
use crate::matrix::{encode_matrix, MatrixCache};

/// How the code is painted: module and finder color, and quiet-zone color.
///
/// The default is plain black on white. No theme detection happens here;
/// callers pick colors per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProperties {
    pub foreground: Color,
    pub background: Color,
}

impl RenderProperties {
    pub const fn new(foreground: Color, background: Color) -> Self {
        RenderProperties {
            foreground,
            background,
        }
    }
}

impl Default for RenderProperties {
    fn default() -> Self {
        RenderProperties::new(Color::BLACK, Color::WHITE)
    }
}

/// Renders QR codes onto [`Canvas`] implementations, memoizing the encoded
/// matrix between calls.
///
/// Keep one renderer per code being displayed: repeated renders of the same
/// payload (resizes, color changes) reuse the cached matrix and only re-run
/// the geometry and drawing, which are cheap.
///
/// # Example
///
/// ```rust
/// use qrender::canvas::ImageCanvas;
/// use qrender::render::{QrRenderer, RenderProperties};
///
/// let mut renderer = QrRenderer::new();
/// let mut canvas = ImageCanvas::new(200, 200);
/// renderer
///     .render("https://example.com", &mut canvas, RenderProperties::default())
///     .unwrap();
/// assert_eq!(canvas.image().dimensions(), (200, 200));
/// ```
#[derive(Debug, Default)]
pub struct QrRenderer {
    cache: MatrixCache,
}

impl QrRenderer {
    pub fn new() -> Self {
        QrRenderer {
            cache: MatrixCache::new(),
        }
    }

    /// Draws `payload` as a QR code on `canvas`.
    ///
    /// Fails with [`RenderError::EmptyPayload`] if the payload is empty and
    /// with [`RenderError::Encoding`] if the encoder rejects it; the canvas
    /// is untouched in both cases.
    pub fn render<C: Canvas>(
        &mut self,
        payload: &str,
        canvas: &mut C,
        properties: RenderProperties,
    ) -> Result<(), RenderError> {
        // The QR specification has no empty symbol; bail before the encoder
        // or the canvas are touched.
        if payload.is_empty() {
            return Err(RenderError::EmptyPayload);
        }

        let matrix = self.cache.get_with(payload, encode_matrix)?;
        let geometry = RenderGeometry::plan(canvas.width(), canvas.height(), matrix.size());
        debug!(
            "Rendering {0}x{0} matrix at {1:.2} units per module",
            matrix.size(),
            geometry.cell_size
        );

        canvas.fill_rect(
            Rect::new(0.0, 0.0, canvas.width(), canvas.height()),
            properties.background,
        );
        draw_finders(canvas, &geometry, properties.foreground);
        draw_data_modules(canvas, matrix, &geometry, properties.foreground);
        Ok(())
    }
}

/// One-shot render without a persistent cache.
pub fn render<C: Canvas>(
    payload: &str,
    canvas: &mut C,
    properties: RenderProperties,
) -> Result<(), RenderError> {
    QrRenderer::new().render(payload, canvas, properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::geometry::{Point, MIN_SURFACE_SIDE, QUIET_ZONE_MARGIN};

    #[test]
    fn test_empty_payload_fails_before_any_draw() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        let result = render("", &mut canvas, RenderProperties::default());
        assert!(matches!(result, Err(RenderError::EmptyPayload)));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_oversized_payload_fails_before_any_draw() {
        // Version 40 at quartile correction tops out well under 4000 bytes,
        // so the encoder rejects this payload.
        let payload = "x".repeat(4000);
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        let result = render(&payload, &mut canvas, RenderProperties::default());
        assert!(matches!(result, Err(RenderError::Encoding(_))));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_background_first_then_three_finders_then_data() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        render("A", &mut canvas, RenderProperties::default()).unwrap();

        assert_eq!(
            canvas.ops[0],
            DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 200.0, 200.0),
                color: Color::WHITE,
            }
        );
        assert!(matches!(canvas.ops[1], DrawOp::Shape { .. }));
        assert!(matches!(canvas.ops[2], DrawOp::Shape { .. }));
        assert!(matches!(canvas.ops[3], DrawOp::Shape { .. }));
        assert!(canvas.ops[4..]
            .iter()
            .all(|op| matches!(op, DrawOp::Rect { .. })));
        assert!(canvas.ops.len() > 4);
    }

    #[test]
    fn test_finder_anchors_for_a_200_unit_surface() {
        // "A" encodes as a version 1 code: 21 modules.
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        render("A", &mut canvas, RenderProperties::default()).unwrap();

        let cell = (200.0 - 2.0 * QUIET_ZONE_MARGIN) / 21.0;
        let extent = cell * 7.0;
        let anchors: Vec<Point> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Shape { shape, .. } => Some(Point::new(shape[0].rect.x, shape[0].rect.y)),
                _ => None,
            })
            .collect();
        let far = 200.0 - QUIET_ZONE_MARGIN - extent;
        assert_eq!(
            anchors,
            vec![
                Point::new(16.0, 16.0),
                Point::new(far, 16.0),
                Point::new(16.0, far),
            ]
        );
    }

    #[test]
    fn test_rendering_twice_reuses_the_cache_and_output() {
        let mut renderer = QrRenderer::new();
        let mut first = RecordingCanvas::new(180.0, 180.0);
        let mut second = RecordingCanvas::new(180.0, 180.0);
        renderer
            .render("repeat me", &mut first, RenderProperties::default())
            .unwrap();
        assert_eq!(renderer.cache.cached_payload(), Some("repeat me"));
        renderer
            .render("repeat me", &mut second, RenderProperties::default())
            .unwrap();
        assert_eq!(renderer.cache.cached_payload(), Some("repeat me"));
        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn test_small_surfaces_plan_on_the_clamped_floor() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        render("A", &mut canvas, RenderProperties::default()).unwrap();

        // The background covers the real canvas...
        assert_eq!(
            canvas.ops[0],
            DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: Color::WHITE,
            }
        );
        // ...while the geometry is planned on the clamped floor.
        let cell = (MIN_SURFACE_SIDE - 2.0 * QUIET_ZONE_MARGIN) / 21.0;
        assert!(cell > 0.0);
        match &canvas.ops[1] {
            DrawOp::Shape { shape, .. } => {
                assert_eq!(shape[0].rect.x, QUIET_ZONE_MARGIN);
                assert_eq!(shape[0].rect.width, cell * 7.0);
            }
            other => panic!("expected a finder shape, got {other:?}"),
        }
    }

    #[test]
    fn test_colors_flow_through_properties() {
        let properties = RenderProperties::new(Color::from_hex(0x102030), Color::from_hex(0xF0F0F0));
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        render("A", &mut canvas, properties).unwrap();

        match &canvas.ops[0] {
            DrawOp::Rect { color, .. } => assert_eq!(*color, properties.background),
            other => panic!("expected the background rect, got {other:?}"),
        }
        assert!(canvas.ops[1..].iter().all(|op| match op {
            DrawOp::Rect { color, .. } => *color == properties.foreground,
            DrawOp::Shape { color, .. } => *color == properties.foreground,
        }));
    }
}
