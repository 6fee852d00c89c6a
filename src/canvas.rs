//! Drawing surfaces the renderer paints onto.
//!
//! The geometry engine is backend-agnostic: it talks to a [`Canvas`] and only
//! ever issues two kinds of draw, plain filled rects for background and data
//! modules, and compound even-odd shapes for finder patterns. Two backends
//! ship with the crate: [`ImageCanvas`] rasterizes into an RGBA buffer from
//! the [`image`] crate and [`SvgCanvas`] builds an SVG document string.

use std::ops::Range;

use image::{Pixel, Rgba, RgbaImage};

use crate::geometry::{Point, Rect, RoundRect};

/*---- Colors ----*/

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Builds an opaque color from a `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Color::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    fn css_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/*---- Canvas trait ----*/

/// A 2D surface the renderer can draw onto.
///
/// Implementations decide how fills are realized. The renderer only assumes
/// that `fill_shape` obeys the even-odd rule: a point is painted exactly when
/// it lies inside an odd number of the given rectangles. Nested finder rings
/// rely on that alternation to show the background through the middle ring
/// without a separate erase pass.
pub trait Canvas {
    /// Surface width in surface units.
    fn width(&self) -> f32;

    /// Surface height in surface units.
    fn height(&self) -> f32;

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fills a compound shape of rounded rectangles under the even-odd rule.
    fn fill_shape(&mut self, shape: &[RoundRect], color: Color);
}

/*---- Raster backend ----*/

/// Canvas backed by an RGBA image buffer.
///
/// Pixels are sampled at their centers against half-open rect containment, so
/// two cells sharing an edge claim each boundary pixel exactly once. Painting
/// a row of adjacent modules leaves no seams and blends no pixel twice.
pub struct ImageCanvas {
    image: RgbaImage,
}

impl ImageCanvas {
    /// Creates a canvas of the given pixel dimensions. The buffer starts
    /// fully transparent; the renderer's background pass covers it.
    pub fn new(width: u32, height: u32) -> Self {
        ImageCanvas {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wraps an existing buffer so a code can be drawn over its contents.
    pub fn from_image(image: RgbaImage) -> Self {
        ImageCanvas { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Canvas for ImageCanvas {
    fn width(&self) -> f32 {
        self.image.width() as f32
    }

    fn height(&self) -> f32 {
        self.image.height() as f32
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rgba = color.to_rgba();
        let (width, height) = self.image.dimensions();
        for y in pixel_span(rect.y, rect.y + rect.height, height) {
            for x in pixel_span(rect.x, rect.x + rect.width, width) {
                self.image.get_pixel_mut(x, y).blend(&rgba);
            }
        }
    }

    fn fill_shape(&mut self, shape: &[RoundRect], color: Color) {
        let Some(bounds) = shape_bounds(shape) else {
            return;
        };
        let rgba = color.to_rgba();
        let (width, height) = self.image.dimensions();
        for y in pixel_span(bounds.y, bounds.y + bounds.height, height) {
            for x in pixel_span(bounds.x, bounds.x + bounds.width, width) {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let enclosed = shape.iter().filter(|part| part.contains(center)).count();
                if enclosed % 2 == 1 {
                    self.image.get_pixel_mut(x, y).blend(&rgba);
                }
            }
        }
    }
}

/// Pixel columns (or rows) whose centers fall inside the half-open span
/// `[min, max)`, clamped to the buffer.
fn pixel_span(min: f32, max: f32, limit: u32) -> Range<u32> {
    let start = (min - 0.5).ceil().max(0.0) as u32;
    let end = (max - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    start.min(end)..end
}

/// Joint bounding box of a compound shape, `None` when it has no parts.
fn shape_bounds(shape: &[RoundRect]) -> Option<Rect> {
    let first = shape.first()?.rect;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x + first.width;
    let mut max_y = first.y + first.height;
    for part in &shape[1..] {
        min_x = min_x.min(part.rect.x);
        min_y = min_y.min(part.rect.y);
        max_x = max_x.max(part.rect.x + part.rect.width);
        max_y = max_y.max(part.rect.y + part.rect.height);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/*---- SVG backend ----*/

/// Canvas that builds an SVG document string.
///
/// The document layout follows the classic generator output: XML declaration,
/// SVG 1.1 doctype, a square viewBox and one element per draw call, with Unix
/// newlines regardless of platform. Call [`SvgCanvas::finish`] to close the
/// document and take the source.
pub struct SvgCanvas {
    side: f32,
    body: String,
}

impl SvgCanvas {
    /// Creates a square SVG canvas with the given side length in user units.
    pub fn new(side: f32) -> Self {
        SvgCanvas {
            side,
            body: String::new(),
        }
    }

    /// Closes the document and returns the complete SVG source.
    pub fn finish(self) -> String {
        let mut result = String::new();
        result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
        result += &format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
            self.side
        );
        result += &self.body;
        result += "</svg>\n";
        result
    }

    fn fill_attributes(color: Color) -> String {
        if color.a == 255 {
            format!("fill=\"{}\"", color.css_hex())
        } else {
            format!(
                "fill=\"{}\" fill-opacity=\"{:.3}\"",
                color.css_hex(),
                f32::from(color.a) / 255.0
            )
        }
    }
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f32 {
        self.side
    }

    fn height(&self) -> f32 {
        self.side
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body += &format!(
            "\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            Self::fill_attributes(color)
        );
    }

    fn fill_shape(&mut self, shape: &[RoundRect], color: Color) {
        let mut path = String::new();
        for (i, part) in shape.iter().enumerate() {
            if i != 0 {
                path += " ";
            }
            path += &round_rect_path(part);
        }
        self.body += &format!(
            "\t<path d=\"{}\" {} fill-rule=\"evenodd\"/>\n",
            path,
            Self::fill_attributes(color)
        );
    }
}

/// One closed subpath tracing `part` clockwise from the top-left corner.
fn round_rect_path(part: &RoundRect) -> String {
    let Rect {
        x,
        y,
        width,
        height,
    } = part.rect;
    let radius = part
        .corner_radius
        .min(width / 2.0)
        .min(height / 2.0)
        .max(0.0);
    if radius == 0.0 {
        return format!("M{},{}h{}v{}h{}z", x, y, width, height, -width);
    }
    let run_x = width - 2.0 * radius;
    let run_y = height - 2.0 * radius;
    format!(
        "M{},{}h{}a{r},{r} 0 0 1 {r},{r}v{}a{r},{r} 0 0 1 {nr},{r}h{}a{r},{r} 0 0 1 {nr},{nr}v{}a{r},{r} 0 0 1 {r},{nr}z",
        x + radius,
        y,
        run_x,
        run_y,
        -run_x,
        -run_y,
        r = radius,
        nr = -radius
    )
}

/*---- Test support ----*/

/// A draw call captured by [`RecordingCanvas`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect { rect: Rect, color: Color },
    Shape { shape: Vec<RoundRect>, color: Color },
}

/// Canvas that records draw calls instead of painting, so tests can assert on
/// exactly what the renderer emitted.
#[cfg(test)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        RecordingCanvas {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect { rect, color });
    }

    fn fill_shape(&mut self, shape: &[RoundRect], color: Color) {
        self.ops.push(DrawOp::Shape {
            shape: shape.to_vec(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_span_covers_centers_in_range() {
        assert_eq!(pixel_span(2.0, 6.0, 10), 2..6);
        assert_eq!(pixel_span(-3.0, 2.5, 10), 0..2);
        assert_eq!(pixel_span(8.0, 14.0, 10), 8..10);
        assert_eq!(pixel_span(4.0, 4.0, 10), 4..4);
        assert_eq!(pixel_span(2.2, 2.4, 10), 2..2);
    }

    #[test]
    fn test_fill_rect_paints_exact_pixels() {
        let mut canvas = ImageCanvas::new(10, 10);
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        canvas.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Color::BLACK);
        let image = canvas.image();
        let dark = image.pixels().filter(|p| p.0 == [0, 0, 0, 255]).count();
        assert_eq!(dark, 16);
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0, 255]);
        // Half-open: the right/bottom edge at 6.0 is outside.
        assert_eq!(image.get_pixel(6, 6).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_adjacent_rects_claim_boundary_pixels_once() {
        let mut canvas = ImageCanvas::new(10, 4);
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 4.0), Color::WHITE);
        // Two half-transparent fills meeting at x = 5. A pixel blended twice
        // would come out darker than its neighbors.
        let half = Color::rgba(0, 0, 0, 128);
        canvas.fill_rect(Rect::new(0.0, 0.0, 5.0, 4.0), half);
        canvas.fill_rect(Rect::new(5.0, 0.0, 5.0, 4.0), half);
        let image = canvas.image();
        let expected = *image.get_pixel(0, 0);
        assert!(image.pixels().all(|p| *p == expected));
    }

    #[test]
    fn test_fill_rect_clips_to_the_buffer() {
        let mut canvas = ImageCanvas::new(8, 8);
        canvas.fill_rect(Rect::new(-20.0, -20.0, 100.0, 100.0), Color::BLACK);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_from_image_draws_over_existing_contents() {
        let mut base = RgbaImage::new(6, 6);
        for pixel in base.pixels_mut() {
            *pixel = Rgba([0, 0, 200, 255]);
        }
        let mut canvas = ImageCanvas::from_image(base);
        canvas.fill_rect(Rect::new(2.0, 2.0, 2.0, 2.0), Color::rgba(200, 0, 0, 128));
        let image = canvas.into_image();
        // Untouched pixels keep the original contents.
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 200, 255]);
        // Filled pixels blend over the base instead of replacing it.
        let blended = image.get_pixel(2, 2);
        assert!(blended.0[0] > 0 && blended.0[2] > 0);
        assert_eq!(blended.0[3], 255);
    }

    #[test]
    fn test_even_odd_rings_alternate() {
        let mut canvas = ImageCanvas::new(14, 14);
        canvas.fill_rect(Rect::new(0.0, 0.0, 14.0, 14.0), Color::WHITE);
        let shape = [
            RoundRect::new(Rect::new(0.0, 0.0, 14.0, 14.0), 0.0),
            RoundRect::new(Rect::new(2.0, 2.0, 10.0, 10.0), 0.0),
            RoundRect::new(Rect::new(4.0, 4.0, 6.0, 6.0), 0.0),
        ];
        canvas.fill_shape(&shape, Color::BLACK);
        let image = canvas.image();
        // Outer ring, background ring, solid core.
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(7, 7).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_shape_draws_nothing() {
        let mut canvas = ImageCanvas::new(4, 4);
        canvas.fill_shape(&[], Color::BLACK);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_svg_document_structure() {
        let mut canvas = SvgCanvas::new(64.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 64.0, 64.0), Color::WHITE);
        let svg = canvas.finish();
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("<!DOCTYPE svg PUBLIC"));
        assert!(svg.contains("viewBox=\"0 0 64 64\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"64\" height=\"64\" fill=\"#FFFFFF\"/>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_compound_shape_uses_even_odd_fill() {
        let mut canvas = SvgCanvas::new(64.0);
        let shape = [
            RoundRect::new(Rect::new(0.0, 0.0, 14.0, 14.0), 0.0),
            RoundRect::new(Rect::new(2.0, 2.0, 10.0, 10.0), 1.0),
            RoundRect::new(Rect::new(4.0, 4.0, 6.0, 6.0), 0.5),
        ];
        canvas.fill_shape(&shape, Color::BLACK);
        let svg = canvas.finish();
        assert!(svg.contains("fill-rule=\"evenodd\""));
        // One subpath per ring, arcs only on the rounded ones.
        assert_eq!(svg.matches('M').count(), 3);
        assert_eq!(svg.matches(" 0 0 1 ").count(), 8);
    }

    #[test]
    fn test_svg_translucent_fill_gets_an_opacity() {
        let mut canvas = SvgCanvas::new(32.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::rgba(0, 0, 0, 51));
        let svg = canvas.finish();
        assert!(svg.contains("fill-opacity=\"0.200\""));
    }

    #[test]
    fn test_color_constructors() {
        assert_eq!(Color::from_hex(0x336699), Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(Color::BLACK.css_hex(), "#000000");
        assert_eq!(Color::rgb(255, 165, 0).css_hex(), "#FFA500");
        assert_eq!(Color::rgba(1, 2, 3, 4).a, 4);
    }
}
