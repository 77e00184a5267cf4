//! Rendering: blits the mask layer onto the overlay canvas.
//!
//! This is the only module that touches `web_sys::CanvasRenderingContext2d`.
//! It receives a read-only view of the mask buffer and produces pixels; it
//! never mutates application state. The working image itself is an `<img>`
//! element underneath the overlay and is not drawn here.

use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::mask::MaskLayer;

/// Replace the overlay's pixels with the mask buffer.
///
/// `put_image_data` overwrites the full rect including alpha, so no clear is
/// needed beforehand.
///
/// # Errors
///
/// Returns `Err` if constructing the `ImageData` or writing it fails.
pub fn draw(ctx: &CanvasRenderingContext2d, mask: &MaskLayer) -> Result<(), JsValue> {
    let (width, height) = (mask.width(), mask.height());
    if width == 0 || height == 0 {
        return Ok(());
    }
    let image_data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(mask.data()), width, height)?;
    ctx.put_image_data(&image_data, 0.0, 0.0)
}
