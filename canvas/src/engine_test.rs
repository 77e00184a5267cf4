#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{BRUSH_SIZE_DEFAULT, BRUSH_SIZE_MAX, BRUSH_SIZE_MIN, ZOOM_MAX, ZOOM_MIN};

const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

fn engine_with_image() -> EngineCore {
    let mut core = EngineCore::new();
    core.load_image(200, 150);
    core
}

fn zoom_wheel(dy: f64) -> (WheelDelta, Modifiers) {
    (
        WheelDelta { dx: 0.0, dy },
        Modifiers { ctrl: true, ..Modifiers::default() },
    )
}

// --- Image lifecycle ---

#[test]
fn new_engine_has_no_image() {
    let core = EngineCore::new();
    assert!(!core.has_image());
    assert_eq!(core.mask.width(), 0);
}

#[test]
fn load_image_sizes_the_mask() {
    let core = engine_with_image();
    assert!(core.has_image());
    assert_eq!(core.mask.width(), 200);
    assert_eq!(core.mask.height(), 150);
}

#[test]
fn load_image_resets_view_and_mask() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(50.0, 50.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(50.0, 50.0));
    let (delta, mods) = zoom_wheel(-1.0);
    core.on_wheel(delta, mods);
    core.camera.pan_by(30.0, 30.0);

    core.load_image(300, 200);
    assert!(core.mask.is_empty());
    assert_eq!(core.camera().zoom, 1.0);
    assert_eq!(core.camera().pan_x, 0.0);
    assert!(matches!(core.gesture, Gesture::Idle));
}

// --- Tool configuration ---

#[test]
fn set_tool_abandons_active_gesture() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(10.0, 10.0), ORIGIN, Button::Primary);
    assert!(core.gesture.is_drawing());
    core.set_tool(ActiveTool::None);
    assert!(matches!(core.gesture, Gesture::Idle));
}

#[test]
fn brush_size_is_clamped_to_ui_range() {
    let mut core = EngineCore::new();
    assert_eq!(core.ui.brush_size, BRUSH_SIZE_DEFAULT);
    core.set_brush_size(1.0);
    assert_eq!(core.ui.brush_size, BRUSH_SIZE_MIN);
    core.set_brush_size(1000.0);
    assert_eq!(core.ui.brush_size, BRUSH_SIZE_MAX);
    core.set_brush_size(44.0);
    assert_eq!(core.ui.brush_size, 44.0);
}

#[test]
fn toggle_brush_mode_flips_between_draw_and_erase() {
    let mut core = EngineCore::new();
    assert_eq!(core.ui.brush_mode, BrushMode::Draw);
    core.toggle_brush_mode();
    assert_eq!(core.ui.brush_mode, BrushMode::Erase);
    core.toggle_brush_mode();
    assert_eq!(core.ui.brush_mode, BrushMode::Draw);
}

// --- Drawing state machine ---

#[test]
fn pointer_down_with_brush_tool_enters_drawing_and_dabs() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    let actions = core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    assert!(core.gesture.is_drawing());
    assert!(matches!(actions[..], [Action::RenderNeeded]));
    assert!(!core.mask.is_empty());
}

#[test]
fn click_without_movement_leaves_a_mark() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(100.0, 75.0));
    assert_ne!(core.mask.alpha_at(100, 75), 0);
}

#[test]
fn pointer_down_without_image_is_ignored() {
    let mut core = EngineCore::new();
    core.set_tool(ActiveTool::Draw);
    let actions = core.on_pointer_down(Point::new(10.0, 10.0), ORIGIN, Button::Primary);
    assert!(actions.is_empty());
    assert!(matches!(core.gesture, Gesture::Idle));
}

#[test]
fn secondary_button_does_not_start_a_gesture() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    let actions = core.on_pointer_down(Point::new(10.0, 10.0), ORIGIN, Button::Secondary);
    assert!(actions.is_empty());
    assert!(matches!(core.gesture, Gesture::Idle));
}

#[test]
fn move_while_drawing_extends_the_stroke() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(20.0, 75.0), ORIGIN, Button::Primary);
    core.on_pointer_move(Point::new(180.0, 75.0), ORIGIN);
    // A point midway along the stroke is covered.
    assert_ne!(core.mask.alpha_at(100, 75), 0);
}

#[test]
fn move_without_pointer_down_draws_nothing() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    let actions = core.on_pointer_move(Point::new(100.0, 75.0), ORIGIN);
    assert!(actions.is_empty());
    assert!(core.mask.is_empty());
}

#[test]
fn pointer_up_returns_to_idle() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(10.0, 10.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(10.0, 10.0));
    assert!(matches!(core.gesture, Gesture::Idle));
}

#[test]
fn pointer_leave_terminates_the_stroke() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(10.0, 10.0), ORIGIN, Button::Primary);
    core.on_pointer_leave(Point::new(-5.0, 10.0));
    assert!(matches!(core.gesture, Gesture::Idle));
}

#[test]
fn erase_mode_strokes_remove_coverage() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(100.0, 75.0));
    assert!(!core.mask.is_empty());

    core.set_brush_mode(BrushMode::Erase);
    core.set_brush_size(BRUSH_SIZE_MAX);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(100.0, 75.0));
    assert!(core.mask.is_empty());
}

// --- Zoom-aware coordinates ---

#[test]
fn drawing_divides_pointer_coordinates_by_zoom() {
    let mut core = engine_with_image();
    let (delta, mods) = zoom_wheel(-1.0);
    // Two zoom-in ticks: zoom = 1.21.
    core.on_wheel(delta, mods);
    core.on_wheel(delta, mods);
    core.set_tool(ActiveTool::Draw);

    // Screen position (121, 60.5) over an origin of zero maps to canvas
    // (100, 50) at zoom 1.21.
    core.on_pointer_down(Point::new(121.0, 60.5), ORIGIN, Button::Primary);
    assert_ne!(core.mask.alpha_at(100, 50), 0);
}

#[test]
fn drawing_respects_the_canvas_bounding_origin() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    let origin = Point::new(400.0, 300.0);
    core.on_pointer_down(Point::new(450.0, 340.0), origin, Button::Primary);
    assert_ne!(core.mask.alpha_at(50, 40), 0);
}

// --- Select tool and the edit prompt ---

#[test]
fn select_stroke_end_requests_edit_prompt() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Select);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    let actions = core.on_pointer_up(Point::new(102.0, 77.0));
    match actions[..] {
        [Action::EditPromptRequested { screen }] => {
            assert_eq!(screen.x, 102.0);
            assert_eq!(screen.y, 77.0);
        }
        _ => panic!("expected EditPromptRequested, got {actions:?}"),
    }
}

#[test]
fn select_stroke_fully_erased_does_not_prompt() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Select);
    core.set_brush_mode(BrushMode::Erase);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    let actions = core.on_pointer_up(Point::new(100.0, 75.0));
    assert!(actions.is_empty());
}

#[test]
fn draw_tool_stroke_end_never_prompts() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    let actions = core.on_pointer_up(Point::new(100.0, 75.0));
    assert!(actions.is_empty());
    assert!(!core.mask.is_empty());
}

#[test]
fn select_prompt_fires_on_pointer_leave_too() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Select);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    let actions = core.on_pointer_leave(Point::new(300.0, 80.0));
    assert!(matches!(
        actions[..],
        [Action::EditPromptRequested { .. }]
    ));
}

// --- Panning ---

#[test]
fn drag_with_no_tool_pans_the_view() {
    let mut core = engine_with_image();
    let (delta, mods) = zoom_wheel(-1.0);
    core.on_wheel(delta, mods);
    core.on_pointer_down(Point::new(100.0, 100.0), ORIGIN, Button::Primary);
    assert!(core.is_panning());
    core.on_pointer_move(Point::new(130.0, 90.0), ORIGIN);
    assert_eq!(core.camera().pan_x, 30.0);
    assert_eq!(core.camera().pan_y, -10.0);
    core.on_pointer_up(Point::new(130.0, 90.0));
    assert!(!core.is_panning());
    // Zoomed in, so the offset is kept.
    assert_eq!(core.camera().pan_x, 30.0);
}

#[test]
fn pan_released_at_full_zoom_recenters() {
    let mut core = engine_with_image();
    core.on_pointer_down(Point::new(100.0, 100.0), ORIGIN, Button::Primary);
    core.on_pointer_move(Point::new(150.0, 120.0), ORIGIN);
    let actions = core.on_pointer_up(Point::new(150.0, 120.0));
    assert!(matches!(actions[..], [Action::ViewChanged]));
    assert_eq!(core.camera().pan_x, 0.0);
    assert_eq!(core.camera().pan_y, 0.0);
}

#[test]
fn panning_never_touches_the_mask() {
    let mut core = engine_with_image();
    core.on_pointer_down(Point::new(100.0, 100.0), ORIGIN, Button::Primary);
    core.on_pointer_move(Point::new(140.0, 140.0), ORIGIN);
    core.on_pointer_up(Point::new(140.0, 140.0));
    assert!(core.mask.is_empty());
}

// --- Wheel zoom ---

#[test]
fn plain_scroll_does_not_zoom() {
    let mut core = engine_with_image();
    let actions = core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 }, Modifiers::default());
    assert!(actions.is_empty());
    assert_eq!(core.camera().zoom, 1.0);
}

#[test]
fn modified_scroll_up_zooms_in() {
    let mut core = engine_with_image();
    let (delta, mods) = zoom_wheel(-1.0);
    let actions = core.on_wheel(delta, mods);
    assert!(matches!(actions[..], [Action::ViewChanged]));
    assert!(core.camera().zoom > 1.0);
}

#[test]
fn modified_scroll_down_zooms_out() {
    let mut core = engine_with_image();
    let (delta, mods) = zoom_wheel(1.0);
    core.on_wheel(delta, mods);
    assert!(core.camera().zoom < 1.0);
}

#[test]
fn zoom_remains_clamped_after_any_wheel_sequence() {
    let mut core = engine_with_image();
    for i in 0..300 {
        let dy = if i % 3 == 0 { 1.0 } else { -1.0 };
        let (delta, mods) = zoom_wheel(dy);
        core.on_wheel(delta, mods);
        let zoom = core.camera().zoom;
        assert!((ZOOM_MIN..=ZOOM_MAX).contains(&zoom));
    }
}

#[test]
fn wheel_without_image_is_ignored() {
    let mut core = EngineCore::new();
    let (delta, mods) = zoom_wheel(-1.0);
    assert!(core.on_wheel(delta, mods).is_empty());
}

// --- Mask ownership ---

#[test]
fn clear_mask_empties_the_overlay() {
    let mut core = engine_with_image();
    core.set_tool(ActiveTool::Draw);
    core.on_pointer_down(Point::new(100.0, 75.0), ORIGIN, Button::Primary);
    core.on_pointer_up(Point::new(100.0, 75.0));
    core.clear_mask();
    assert!(core.mask.is_empty());
}
