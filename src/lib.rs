#![forbid(unsafe_code)]

//! # qrender
//!
//! A Rust library for rendering styled QR codes onto pluggable drawing surfaces.
//!
//! `qrender` takes a text payload and draws a scannable QR code with a
//! distinctive nested-ring finder style. Encoding is delegated to the
//! [`qrcodegen`] crate; this library owns everything visual: the quiet-zone
//! margin, per-module cell sizing, the three finder marks drawn as even-odd
//! compound shapes, and the data module fills. Output targets plug in through
//! the [`canvas::Canvas`] trait, with raster and SVG backends included.
//!
//! ## Features
//!
//! - Render QR codes onto any surface implementing the [`canvas::Canvas`] trait.
//! - Raster output into RGBA [`image`] buffers, vector output as SVG strings.
//! - Custom foreground and background colors per render call.
//! - Finder patterns drawn as nested rounded-rectangle rings with even-odd fills.
//! - Quartile error correction, leaving headroom for logo overlays.
//! - Per-renderer matrix caching: repeated renders of one payload encode once.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrender = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render into an in-memory image buffer:
//!
//! ```rust
//! use qrender::helper::generate_image_buffer;
//!
//! let img = generate_image_buffer("https://example.com", None, None).unwrap();
//! assert_eq!(img.dimensions(), (256, 256));
//! ```
//!
//! Drive the renderer directly for custom colors and surfaces:
//!
//! ```rust
//! use qrender::canvas::{Color, ImageCanvas};
//! use qrender::render::{QrRenderer, RenderProperties};
//!
//! let mut renderer = QrRenderer::new();
//! let mut canvas = ImageCanvas::new(200, 200);
//! let properties = RenderProperties::new(Color::from_hex(0x1A1A2E), Color::WHITE);
//! renderer
//!     .render("WIFI:T:WPA;S:home;P:hunter2;;", &mut canvas, properties)
//!     .unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`render`]: The compositor and its entry points.
//! - [`canvas`]: Drawing surface trait, colors, raster and SVG backends.
//! - [`matrix`]: Bit matrix production, the encoder boundary, caching.
//! - [`geometry`]: Quiet zone, cell and finder-pattern size planning.
//! - [`finder`]: Nested-ring finder pattern shapes.
//! - [`data`]: Data band partition and module fills.
//! - [`helper`]: One-call conveniences for buffers, SVG strings and PNG files.
//! - [`error`]: Rendering failure modes.

pub mod render;
pub mod canvas;
pub mod matrix;
pub mod geometry;
pub mod finder;
pub mod data;
pub mod helper;
pub mod error;
