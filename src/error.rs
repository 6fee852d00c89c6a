use thiserror::Error;

/// Rendering failure modes.
///
/// Both render-path variants are deterministic functions of the input and are
/// raised before anything is drawn, so a failed render never leaves partial
/// output on the canvas. [`RenderError::Image`] only occurs in the
/// file-saving helpers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload was empty. The QR specification has no symbol for zero
    /// bytes, so this is rejected before the encoder is ever invoked.
    #[error("QR code must have non-empty contents")]
    EmptyPayload,

    /// The external encoder rejected the payload.
    #[error("payload cannot be encoded: {0}")]
    Encoding(#[from] qrcodegen::DataTooLong),

    /// Writing a rendered image to disk failed.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
