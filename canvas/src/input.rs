//! Input model: tools, modifier keys, buttons, and the gesture state machine.
//!
//! `ActiveTool` and `Modifiers` capture the user's intent at the time of a
//! pointer event. `Gesture` is the active interaction being tracked between
//! pointer-down and pointer-up; it carries the context needed to extend a
//! stroke or a pan incrementally.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::BRUSH_SIZE_DEFAULT;
use crate::mask::BrushMode;

/// Which editing tool is currently active.
///
/// With no tool active the pointer navigates (pans) the viewport. Draw and
/// Select both paint the mask; Select additionally asks for an edit prompt
/// when a stroke ends over a non-empty mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    /// No tool: pointer drags pan the viewport.
    #[default]
    None,
    /// Free-hand mask painting.
    Draw,
    /// Mask painting that opens the edit prompt on stroke end.
    Select,
}

impl ActiveTool {
    /// Whether this tool paints on the mask layer.
    #[must_use]
    pub fn is_brush(self) -> bool {
        matches!(self, Self::Draw | Self::Select)
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a wheel event with these modifiers is a zoom gesture rather
    /// than a page scroll (ctrl on most platforms, cmd on macOS).
    #[must_use]
    pub fn is_zoom_gesture(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier. A single-finger touch maps to `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Wheel / trackpad scroll delta in pixels (positive `dy` = down).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Persistent tool configuration visible to the host UI.
#[derive(Debug, Clone, Copy)]
pub struct UiState {
    /// Currently active tool.
    pub tool: ActiveTool,
    /// Draw or erase composition for brush strokes.
    pub brush_mode: BrushMode,
    /// Brush diameter in canvas pixels.
    pub brush_size: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: ActiveTool::None,
            brush_mode: BrushMode::Draw,
            brush_size: BRUSH_SIZE_DEFAULT,
        }
    }
}

/// The gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A brush stroke is in progress.
    Drawing {
        /// Canvas-space position of the previous sample; the next segment
        /// strokes from here.
        last: Point,
    },
    /// The user is dragging the viewport.
    Panning {
        /// Screen-space position of the previous pointer event, used to
        /// compute the pan delta.
        last_screen: Point,
    },
}

impl Gesture {
    /// Whether a brush stroke is currently in progress.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
