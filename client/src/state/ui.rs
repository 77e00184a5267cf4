//! Editor chrome state: tool selection, brush config, panel visibility, and
//! the edit popover anchor.
//!
//! This is the single owner of shared UI state for the editing view; it is
//! provided via context and passed down, never reached through globals. The
//! canvas host mirrors the tool and brush fields into the engine.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use canvas::consts::{BRUSH_SIZE_DEFAULT, BRUSH_SIZE_MAX, BRUSH_SIZE_MIN};
use canvas::input::ActiveTool;
use canvas::mask::BrushMode;

/// Screen position the edit popover anchors to (the stroke-end cursor).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopoverAnchor {
    pub x: f64,
    pub y: f64,
}

/// Shared UI state for the editing view.
#[derive(Clone, Debug)]
pub struct EditorUi {
    /// Currently active tool; `None` means the pointer navigates.
    pub tool: ActiveTool,
    /// Draw or erase brush composition.
    pub brush_mode: BrushMode,
    /// Brush diameter in canvas pixels.
    pub brush_size: f64,
    /// Left (controls) sidebar expanded.
    pub left_sidebar_visible: bool,
    /// Right (history) sidebar expanded.
    pub right_sidebar_visible: bool,
    /// Edit popover anchor while it is open.
    pub popover: Option<PopoverAnchor>,
    /// Bumped whenever a new base image is uploaded, so the canvas host can
    /// tell a fresh upload apart from a version switch.
    pub base_epoch: u64,
}

impl Default for EditorUi {
    fn default() -> Self {
        Self {
            tool: ActiveTool::None,
            brush_mode: BrushMode::Draw,
            brush_size: BRUSH_SIZE_DEFAULT,
            left_sidebar_visible: true,
            right_sidebar_visible: true,
            popover: None,
            base_epoch: 0,
        }
    }
}

impl EditorUi {
    /// Select a tool, or deselect it (back to navigation) when it is
    /// already active.
    pub fn toggle_tool(&mut self, tool: ActiveTool) {
        self.tool = if self.tool == tool { ActiveTool::None } else { tool };
    }

    /// Flip between draw and erase without changing the active tool.
    pub fn toggle_brush_mode(&mut self) {
        self.brush_mode = match self.brush_mode {
            BrushMode::Draw => BrushMode::Erase,
            BrushMode::Erase => BrushMode::Draw,
        };
    }

    /// Set the brush diameter, clamped to the slider range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush_size = size.clamp(BRUSH_SIZE_MIN, BRUSH_SIZE_MAX);
    }

    /// Record that a new base image was uploaded.
    pub fn note_new_base(&mut self) {
        self.base_epoch += 1;
        self.popover = None;
    }

    /// Open the edit popover at a stroke-end position.
    pub fn open_popover(&mut self, x: f64, y: f64) {
        self.popover = Some(PopoverAnchor { x, y });
    }

    /// Close the edit popover.
    pub fn close_popover(&mut self) {
        self.popover = None;
    }

    /// Cursor class for the canvas stage, derived from tool and image
    /// availability.
    #[must_use]
    pub fn cursor_class(&self, has_image: bool, panning: bool) -> &'static str {
        if panning {
            return "cursor-grabbing";
        }
        match self.tool {
            ActiveTool::None if has_image => "cursor-grab",
            ActiveTool::Draw | ActiveTool::Select => "cursor-crosshair",
            ActiveTool::None => "cursor-default",
        }
    }
}
