//! Bit matrix production and caching.
//!
//! Encoding is delegated to the [`qrcodegen`] crate; this module owns the
//! boundary around it. It validates the payload, runs the encoder at the
//! fixed error-correction level, and repacks the result into an immutable
//! [`BitMatrix`]. A single-slot [`MatrixCache`] memoizes the matrix for the
//! most recent payload so repeated renders of the same contents never
//! re-encode.

use qrcodegen::{QrCode, QrCodeEcc};
use tracing::debug;

use crate::error::RenderError;

/// Error-correction level used for every encode.
///
/// Quartile recovers from roughly 25% damaged modules, enough headroom for a
/// logo overlay to cover part of the code while it stays scannable, without
/// the module density the High level would cost.
pub const ERROR_CORRECTION: QrCodeEcc = QrCodeEcc::Quartile;

/// An immutable square grid of dark/light modules.
///
/// Modules are packed bitwise in row-major order and never mutated after
/// construction. Reads outside the grid return light modules, matching the
/// encoder's own convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    bits: Vec<u8>,
}

impl BitMatrix {
    /// Copies the module grid out of an encoded QR code.
    pub fn from_qr(qr: &QrCode) -> Self {
        let size = qr.size() as usize;
        BitMatrix::from_fn(size, |x, y| qr.get_module(x as i32, y as i32))
    }

    /// Builds a `size` x `size` matrix by sampling `f` at every `(x, y)`.
    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut bits = vec![0u8; (size * size + 7) / 8];
        for y in 0..size {
            for x in 0..size {
                if f(x, y) {
                    let index = y * size + x;
                    bits[index >> 3] |= 1 << (index & 7);
                }
            }
        }
        BitMatrix { size, bits }
    }

    /// Width and height of the grid, in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the module at `(x, y)` is dark. Coordinates outside
    /// the grid read as light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let index = y * self.size + x;
        self.bits[index >> 3] >> (index & 7) & 1 != 0
    }
}

/// Encodes `payload` into a bit matrix at the fixed error-correction level.
///
/// The encoder picks the smallest version that fits the payload, so the
/// resulting matrix is between 21 and 177 modules wide.
pub fn encode_matrix(payload: &str) -> Result<BitMatrix, RenderError> {
    if payload.is_empty() {
        return Err(RenderError::EmptyPayload);
    }
    let qr = QrCode::encode_text(payload, ERROR_CORRECTION)?;
    Ok(BitMatrix::from_qr(&qr))
}

/// Single-slot memoization of the most recently encoded payload.
///
/// Each renderer carries its own cache; nothing is shared across instances.
/// Recomputing on every call would be semantically identical, the contract is
/// only that repeated lookups with an unchanged payload skip the encoder.
#[derive(Debug, Default)]
pub struct MatrixCache {
    slot: Option<CacheSlot>,
}

#[derive(Debug)]
struct CacheSlot {
    payload: String,
    matrix: BitMatrix,
}

impl MatrixCache {
    pub fn new() -> Self {
        MatrixCache { slot: None }
    }

    /// Returns the matrix for `payload`, invoking `encode` only when the slot
    /// is empty or holds a different payload. A failed encode leaves the
    /// cache empty.
    pub fn get_with<E>(
        &mut self,
        payload: &str,
        encode: impl FnOnce(&str) -> Result<BitMatrix, E>,
    ) -> Result<&BitMatrix, E> {
        let cached = self.slot.take().filter(|slot| slot.payload == payload);
        let slot = match cached {
            Some(slot) => slot,
            None => {
                debug!("Matrix cache miss, encoding {} byte payload", payload.len());
                CacheSlot {
                    payload: payload.to_owned(),
                    matrix: encode(payload)?,
                }
            }
        };
        Ok(&self.slot.insert(slot).matrix)
    }

    /// The payload currently held in the cache, if any.
    pub fn cached_payload(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.payload.as_str())
    }
}
