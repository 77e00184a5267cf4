//! Editor engine: ties the mask layer, camera, and gesture machine together.
//!
//! `EngineCore` contains every rule that doesn't depend on the canvas
//! element, so it can be tested without WASM/browser dependencies. `Engine`
//! wraps it with the overlay `HtmlCanvasElement` and delegates pixel output
//! to [`crate::render`].
//!
//! Input handlers return [`Action`]s for the host to process; the engine
//! itself never reaches back into the DOM beyond its own canvas.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::camera::{Camera, Point};
use crate::consts::{BRUSH_SIZE_MAX, BRUSH_SIZE_MIN};
use crate::input::{ActiveTool, Button, Gesture, Modifiers, UiState, WheelDelta};
use crate::mask::{BrushMode, MaskError, MaskLayer};
use crate::render;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// The mask overlay changed; the host should schedule a repaint.
    RenderNeeded,
    /// Zoom or pan changed; the host should update the container transform.
    ViewChanged,
    /// A select-tool stroke ended over a non-empty mask; the host should
    /// open the edit prompt anchored at this screen position.
    EditPromptRequested {
        /// Screen-space position of the terminating pointer event.
        screen: Point,
    },
}

/// Core engine state, free of browser dependencies.
pub struct EngineCore {
    pub mask: MaskLayer,
    pub camera: Camera,
    pub ui: UiState,
    pub gesture: Gesture,
    has_image: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            mask: MaskLayer::new(0, 0),
            camera: Camera::default(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            has_image: false,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Image lifecycle ---

    /// A new working image was laid out at the given intrinsic canvas size.
    /// Resizes (and thereby clears) the mask and resets the view transform.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.mask.resize(width, height);
        self.camera.reset();
        self.gesture = Gesture::Idle;
        self.has_image = true;
    }

    /// Whether a working image is currently loaded.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.has_image
    }

    // --- Tool configuration ---

    /// Set the active tool. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, tool: ActiveTool) {
        self.ui.tool = tool;
        self.gesture = Gesture::Idle;
    }

    /// Set the brush diameter, clamped to the UI range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.ui.brush_size = size.clamp(BRUSH_SIZE_MIN, BRUSH_SIZE_MAX);
    }

    /// Set the brush composition mode.
    pub fn set_brush_mode(&mut self, mode: BrushMode) {
        self.ui.brush_mode = mode;
    }

    /// Flip between draw and erase without changing the active tool.
    pub fn toggle_brush_mode(&mut self) {
        self.ui.brush_mode = match self.ui.brush_mode {
            BrushMode::Draw => BrushMode::Erase,
            BrushMode::Erase => BrushMode::Draw,
        };
    }

    /// Wipe the mask overlay (cancelled edit, consumed mask).
    pub fn clear_mask(&mut self) {
        self.mask.clear();
    }

    // --- Input events ---

    /// Pointer pressed. `client` is the event position in CSS pixels and
    /// `origin` the canvas bounding-rect top-left at event time.
    pub fn on_pointer_down(&mut self, client: Point, origin: Point, button: Button) -> Vec<Action> {
        if !self.has_image || button != Button::Primary {
            return Vec::new();
        }

        if self.ui.tool.is_brush() {
            let pos = self.camera.screen_to_canvas(origin, client);
            // Deposit the starting dab immediately so a click with no
            // movement still leaves a brush-radius mark.
            self.mask.dab(pos, self.ui.brush_size, self.ui.brush_mode);
            self.gesture = Gesture::Drawing { last: pos };
            return vec![Action::RenderNeeded];
        }

        self.gesture = Gesture::Panning { last_screen: client };
        Vec::new()
    }

    /// Pointer moved.
    pub fn on_pointer_move(&mut self, client: Point, origin: Point) -> Vec<Action> {
        match self.gesture {
            Gesture::Drawing { last } => {
                let pos = self.camera.screen_to_canvas(origin, client);
                self.mask
                    .paint_segment(last, pos, self.ui.brush_size, self.ui.brush_mode);
                self.gesture = Gesture::Drawing { last: pos };
                vec![Action::RenderNeeded]
            }
            Gesture::Panning { last_screen } => {
                self.camera
                    .pan_by(client.x - last_screen.x, client.y - last_screen.y);
                self.gesture = Gesture::Panning { last_screen: client };
                vec![Action::ViewChanged]
            }
            Gesture::Idle => Vec::new(),
        }
    }

    /// Pointer released. The terminating screen position is forwarded so the
    /// edit prompt can anchor near the cursor.
    pub fn on_pointer_up(&mut self, client: Point) -> Vec<Action> {
        match self.gesture {
            Gesture::Drawing { .. } => {
                self.gesture = Gesture::Idle;
                if self.ui.tool == ActiveTool::Select && !self.mask.is_empty() {
                    return vec![Action::EditPromptRequested { screen: client }];
                }
                Vec::new()
            }
            Gesture::Panning { .. } => {
                self.gesture = Gesture::Idle;
                if self.camera.end_pan() {
                    vec![Action::ViewChanged]
                } else {
                    Vec::new()
                }
            }
            Gesture::Idle => Vec::new(),
        }
    }

    /// Pointer left the surface; terminates any gesture exactly like a
    /// release at the exit position.
    pub fn on_pointer_leave(&mut self, client: Point) -> Vec<Action> {
        self.on_pointer_up(client)
    }

    /// Wheel scrolled. Zooms only when the platform zoom modifier is held;
    /// a plain scroll is left to the page.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.is_zoom_gesture() || !self.has_image {
            return Vec::new();
        }
        if delta.dy < 0.0 {
            self.camera.zoom_in();
        } else {
            self.camera.zoom_out();
        }
        vec![Action::ViewChanged]
    }

    // --- Queries ---

    /// The current view transform.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Whether a pan drag is in progress (for cursor feedback).
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }
}

/// The full engine. Wraps [`EngineCore`] and owns the overlay canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Load a new working image: sync the canvas element's intrinsic size
    /// and reset mask and view state.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.core.load_image(width, height);
    }

    /// Top-left of the overlay's bounding rect, for coordinate mapping.
    #[must_use]
    pub fn origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    /// Serialize the current mask to PNG bytes.
    ///
    /// # Errors
    ///
    /// Propagates [`MaskError`] from the mask layer.
    pub fn mask_png(&self) -> Result<Vec<u8>, MaskError> {
        self.core.mask.to_png()
    }

    /// Blit the mask layer onto the overlay canvas.
    ///
    /// A missing or non-2d context means the element isn't mounted yet;
    /// that is a silent no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Ok(Some(obj)) = self.canvas.get_context("2d") else {
            return Ok(());
        };
        let Ok(ctx) = obj.dyn_into::<web_sys::CanvasRenderingContext2d>() else {
            return Ok(());
        };
        render::draw(&ctx, &self.core.mask)
    }
}
