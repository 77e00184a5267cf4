//! Mask raster layer: the translucent selection overlay painted by the brush.
//!
//! The layer owns a CPU-side RGBA buffer congruent with the displayed image's
//! intrinsic canvas size. Zero alpha means "unselected"; any non-zero alpha
//! marks the pixel for the next edit. Draw strokes deposit a constant
//! semi-transparent white, so the mask behaves as coverage rather than
//! accumulating paint: overlapping strokes never get more opaque than a
//! single one. Erase strokes zero the pixels outright, whatever was there.
//!
//! Strokes are rasterized as overlapping hard-edged discs stamped along the
//! segment, which gives round caps and joins for free and guarantees a
//! zero-length "dab" still leaves a full brush-radius mark.
//!
//! The buffer is owned exclusively by the engine; [`crate::render`] blits it
//! to the overlay canvas and nothing else writes to it.

#[cfg(test)]
#[path = "mask_test.rs"]
mod mask_test;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::camera::Point;
use crate::consts::{DAB_SPACING, MASK_ALPHA};

/// Composition mode for a brush stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushMode {
    /// Deposit mask coverage.
    #[default]
    Draw,
    /// Remove mask coverage along the stroke.
    Erase,
}

/// Errors from serializing the mask layer.
#[derive(Debug, Error)]
pub enum MaskError {
    /// The layer has no pixels yet (the canvas was never laid out).
    #[error("mask surface has zero size")]
    EmptySurface,
    /// PNG encoding failed.
    #[error("failed to encode mask: {0}")]
    Encode(#[from] image::ImageError),
}

/// The mask overlay's pixel buffer, addressed in canvas-space pixels.
pub struct MaskLayer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MaskLayer {
    /// Create a fully transparent layer of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Width in canvas pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in canvas pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Alpha of the pixel at `(x, y)`, or 0 outside the surface.
    #[must_use]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[idx + 3]
    }

    /// Resize to match a newly displayed image, discarding any mask.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize((width as usize) * (height as usize) * 4, 0);
    }

    /// Wipe the whole surface back to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// True if no pixel anywhere has been painted.
    ///
    /// The semantic check is "any non-zero alpha anywhere"; since draw always
    /// writes color and alpha together, scanning every byte is equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Stamp a single brush disc. `diameter` is in canvas pixels.
    pub fn dab(&mut self, center: Point, diameter: f64, mode: BrushMode) {
        let radius = diameter / 2.0;
        let r_sq = radius * radius;

        let x_min = ((center.x - radius).floor().max(0.0)) as u32;
        let y_min = ((center.y - radius).floor().max(0.0)) as u32;
        let x_max = ((center.x + radius).ceil().min(f64::from(self.width))) as u32;
        let y_max = ((center.y + radius).ceil().min(f64::from(self.height))) as u32;

        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = f64::from(px) + 0.5 - center.x;
                let dy = f64::from(py) + 0.5 - center.y;
                if dx * dx + dy * dy > r_sq {
                    continue;
                }
                let idx = ((py as usize) * (self.width as usize) + (px as usize)) * 4;
                match mode {
                    // Constant overwrite keeps overlapping strokes at the
                    // single-stroke alpha.
                    BrushMode::Draw => {
                        self.data[idx..idx + 4].copy_from_slice(&[255, 255, 255, MASK_ALPHA]);
                    }
                    BrushMode::Erase => {
                        self.data[idx..idx + 4].copy_from_slice(&[0, 0, 0, 0]);
                    }
                }
            }
        }
    }

    /// Rasterize one stroke segment by stamping discs from `from` to `to`.
    ///
    /// Both endpoints are stamped, so a segment degenerating to a point is
    /// exactly a [`Self::dab`].
    pub fn paint_segment(&mut self, from: Point, to: Point, diameter: f64, mode: BrushMode) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let dist = dx.hypot(dy);

        if dist == 0.0 {
            self.dab(from, diameter, mode);
            return;
        }

        let spacing = (diameter / 2.0 * DAB_SPACING).max(0.5);
        let steps = (dist / spacing).ceil() as usize;
        for i in 0..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps as f64;
            self.dab(Point::new(from.x + dx * t, from.y + dy * t), diameter, mode);
        }
    }

    /// Serialize the layer as a lossless PNG at exactly the surface's pixel
    /// dimensions, ready for pixel-aligned transport next to the working
    /// image.
    ///
    /// # Errors
    ///
    /// [`MaskError::EmptySurface`] if the layer has zero size, or
    /// [`MaskError::Encode`] if PNG encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>, MaskError> {
        if self.width == 0 || self.height == 0 {
            return Err(MaskError::EmptySurface);
        }
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            &self.data,
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }
}
