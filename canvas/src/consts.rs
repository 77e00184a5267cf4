//! Shared numeric constants for the canvas crate.

// ── View transform ──────────────────────────────────────────────

/// Minimum zoom factor (20%).
pub const ZOOM_MIN: f64 = 0.2;

/// Maximum zoom factor (500%).
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplier applied per discrete zoom-in tick.
pub const ZOOM_IN_STEP: f64 = 1.1;

/// Multiplier applied per discrete zoom-out tick (inverse of a zoom-in tick).
pub const ZOOM_OUT_STEP: f64 = 1.0 / ZOOM_IN_STEP;

// ── Brush ───────────────────────────────────────────────────────

/// Smallest selectable brush diameter in canvas pixels.
pub const BRUSH_SIZE_MIN: f64 = 5.0;

/// Largest selectable brush diameter in canvas pixels.
pub const BRUSH_SIZE_MAX: f64 = 100.0;

/// Brush diameter offered before the user touches the slider.
pub const BRUSH_SIZE_DEFAULT: f64 = 44.0;

// ── Mask raster ─────────────────────────────────────────────────

/// Alpha deposited by a draw stroke (~0.7 of full opacity).
pub const MASK_ALPHA: u8 = 178;

/// Disc-stamp spacing along a stroke segment, as a fraction of the brush
/// radius. Must stay below 1.0 so consecutive stamps overlap and a slow
/// stroke leaves no gaps.
pub const DAB_SPACING: f64 = 0.5;
