//! One-call conveniences for common outputs.
//!
//! These wrap [`render`](crate::render::render) for the three output shapes
//! most callers want: an in-memory image buffer, an SVG string, or a PNG file
//! on disk. Every parameter beyond the content is optional and falls back to
//! the crate defaults (a 256 unit square surface, black on white).

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use image::RgbaImage;
use tracing::debug;

use crate::canvas::{ImageCanvas, SvgCanvas};
use crate::error::RenderError;
use crate::matrix::BitMatrix;
use crate::render::{render, RenderProperties};

/// Surface side used when callers do not pick one.
pub const DEFAULT_SIDE: u32 = 256;

/// Renders `content` into an RGBA image buffer.
///
/// # Arguments
///
/// * `content` - The text to encode into the QR code.
/// * `side` - Optional. Pixel side of the square image. Defaults to [`DEFAULT_SIDE`].
/// * `properties` - Optional. Colors to draw with. Defaults to black on white.
///
/// # Errors
///
/// Returns a [`RenderError`] if the content is empty or cannot be encoded.
///
/// # Example
///
/// ```rust
/// use qrender::helper::generate_image_buffer;
///
/// let img = generate_image_buffer("Hello, World!", None, None).unwrap();
/// assert_eq!(img.dimensions(), (256, 256));
/// ```
pub fn generate_image_buffer(
    content: &str,
    side: Option<u32>,
    properties: Option<RenderProperties>,
) -> Result<RgbaImage, RenderError> {
    let side = side.unwrap_or(DEFAULT_SIDE);
    let mut canvas = ImageCanvas::new(side, side);
    render(content, &mut canvas, properties.unwrap_or_default())?;
    Ok(canvas.into_image())
}

/// Renders `content` into an SVG document string.
///
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Arguments
///
/// * `content` - The text to encode into the QR code.
/// * `side` - Optional. Side of the viewBox in user units. Defaults to [`DEFAULT_SIDE`].
/// * `properties` - Optional. Colors to draw with. Defaults to black on white.
///
/// # Example
///
/// ```rust
/// use qrender::helper::generate_svg_string;
///
/// let svg = generate_svg_string("Hello, World!", None, None).unwrap();
/// assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
/// ```
pub fn generate_svg_string(
    content: &str,
    side: Option<f32>,
    properties: Option<RenderProperties>,
) -> Result<String, RenderError> {
    let mut canvas = SvgCanvas::new(side.unwrap_or(DEFAULT_SIDE as f32));
    render(content, &mut canvas, properties.unwrap_or_default())?;
    Ok(canvas.finish())
}

/// Saves a rendered image buffer as a PNG file.
///
/// # Arguments
///
/// * `image` - The rendered buffer to save.
/// * `directory` - Optional. The directory the file is written into, created
///   if it does not exist. Defaults to "generated".
/// * `filename` - Optional. The name of the image file without extension. If
///   not provided, a timestamp-based filename is used.
///
/// # Errors
///
/// Returns an `image::ImageError` if there is an error saving the image.
pub fn save_image_buffer(
    image: &RgbaImage,
    directory: Option<&str>,
    filename: Option<&str>,
) -> Result<(), image::ImageError> {
    let directory = directory.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let start = SystemTime::now();
            let since_the_epoch = start
                .duration_since(UNIX_EPOCH)
                .expect("Time went backwards");
            since_the_epoch.as_millis().to_string()
        }
    };

    let file_path = format!("{}/{}.png", directory, filename);

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory).exists() {
        fs::create_dir_all(directory)?;
    }

    debug!("Saving QR image to {}", file_path);
    image.save(Path::new(&file_path))
}

/// Renders `content` and saves it as a PNG file in one call.
///
/// # Arguments
///
/// * `content` - The text to encode into the QR code.
/// * `directory` - Optional. The directory the file is written into. Defaults to "generated".
/// * `filename` - Optional. The name of the image file without extension. Defaults to a timestamp.
/// * `side` - Optional. Pixel side of the square image. Defaults to [`DEFAULT_SIDE`].
/// * `properties` - Optional. Colors to draw with. Defaults to black on white.
///
/// # Example
///
/// ```no_run
/// use qrender::helper::generate_image;
///
/// generate_image("Hello, World!", Some("images"), Some("qr_code"), None, None).unwrap();
/// ```
pub fn generate_image(
    content: &str,
    directory: Option<&str>,
    filename: Option<&str>,
    side: Option<u32>,
    properties: Option<RenderProperties>,
) -> Result<(), RenderError> {
    let image = generate_image_buffer(content, side, properties)?;
    save_image_buffer(&image, directory, filename)?;
    Ok(())
}

/// Prints the given matrix to the console, dark modules as full blocks, with
/// the standard four module quiet zone.
///
/// # Example
///
/// ```rust
/// use qrender::helper::print_matrix;
/// use qrender::matrix::encode_matrix;
///
/// let matrix = encode_matrix("Hello, World!").unwrap();
/// print_matrix(&matrix);
/// ```
pub fn print_matrix(matrix: &BitMatrix) {
    let border: i32 = 4;
    let size = matrix.size() as i32;
    for y in -border..size + border {
        for x in -border..size + border {
            let dark = x >= 0 && y >= 0 && matrix.get(x as usize, y as usize);
            let c: char = if dark { '█' } else { ' ' };
            print!("{0}{0}", c);
        }
        println!();
    }
    println!();
}
