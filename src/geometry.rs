//! Geometry planning for the rendered code.
//!
//! Everything the renderer draws derives from the canvas dimensions and three
//! constants: the fixed quiet-zone margin, the minimum surface side, and the
//! 7-module finder span the QR specification mandates. The planner reduces an
//! arbitrary surface to a square drawing area and hands out cell and
//! finder-pattern sizes in surface units.

/// Blank border kept around the code so scanners can lock onto it, in surface
/// units. Fixed regardless of surface size.
pub const QUIET_ZONE_MARGIN: f32 = 16.0;

/// Smallest surface side the geometry is planned for. Smaller canvases are
/// clamped up to this floor so the per-module cell size stays positive.
pub const MIN_SURFACE_SIDE: f32 = 48.0;

/// A finder pattern always covers a 7x7 block of modules.
pub const FINDER_MODULE_SPAN: usize = 7;

/// A position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Containment is half-open: left and top edges are inside, right and
    /// bottom edges are not. Rects sharing an edge never claim the same point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// A rectangle with circular corner rounding, the building block of finder
/// patterns. A radius of zero is a plain rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRect {
    pub rect: Rect,
    pub corner_radius: f32,
}

impl RoundRect {
    pub const fn new(rect: Rect, corner_radius: f32) -> Self {
        RoundRect {
            rect,
            corner_radius,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        if !self.rect.contains(point) {
            return false;
        }
        let radius = self
            .corner_radius
            .min(self.rect.width / 2.0)
            .min(self.rect.height / 2.0);
        if radius <= 0.0 {
            return true;
        }
        // Distance from the radius-inset core rect decides the corner arcs.
        let core_x = point
            .x
            .clamp(self.rect.x + radius, self.rect.x + self.rect.width - radius);
        let core_y = point
            .y
            .clamp(self.rect.y + radius, self.rect.y + self.rect.height - radius);
        let dx = point.x - core_x;
        let dy = point.y - core_y;
        dx * dx + dy * dy <= radius * radius
    }
}

/// Sizes computed once per render pass from the canvas dimensions and the
/// matrix dimension.
///
/// The surface is forced square by taking the smaller canvas dimension,
/// floored at [`MIN_SURFACE_SIDE`]. With the margin fixed this keeps the cell
/// size strictly positive for every matrix the encoder can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    /// Side length of the square drawing area.
    pub side: f32,
    /// Quiet-zone width on every edge.
    pub margin: f32,
    /// Width and height of one module cell.
    pub cell_size: f32,
    /// Side length of a finder pattern bounding box.
    pub finder_extent: f32,
}

impl RenderGeometry {
    /// Plans the geometry for a `modules`-wide matrix on a canvas of the
    /// given dimensions.
    pub fn plan(width: f32, height: f32, modules: usize) -> Self {
        assert!(modules > 0, "matrix must contain at least one module");
        let side = width.min(height).max(MIN_SURFACE_SIDE);
        let cell_size = (side - 2.0 * QUIET_ZONE_MARGIN) / modules as f32;
        RenderGeometry {
            side,
            margin: QUIET_ZONE_MARGIN,
            cell_size,
            finder_extent: cell_size * FINDER_MODULE_SPAN as f32,
        }
    }

    /// Top-left corners of the three finder patterns, in drawing order:
    /// top-left, top-right, bottom-left.
    pub fn finder_anchors(&self) -> [Point; 3] {
        let near = self.margin;
        let far = self.side - self.margin - self.finder_extent;
        [
            Point::new(near, near),
            Point::new(far, near),
            Point::new(near, far),
        ]
    }

    /// Surface rect covered by the module at `(col, row)`.
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            self.margin + col as f32 * self.cell_size,
            self.margin + row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }
}
