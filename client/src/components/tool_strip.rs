//! Floating tool strip: draw / select tools, eraser toggle, brush size.

use leptos::prelude::*;

use canvas::consts::{BRUSH_SIZE_MAX, BRUSH_SIZE_MIN};
use canvas::input::ActiveTool;
use canvas::mask::BrushMode;

use crate::state::ui::EditorUi;

fn tool_button_class(active: bool) -> &'static str {
    if active {
        "tool-strip__button tool-strip__button--active"
    } else {
        "tool-strip__button"
    }
}

/// Tool selector pill at the bottom of the canvas, with the brush size
/// slider shown while a brush tool is active.
#[component]
pub fn ToolStrip() -> impl IntoView {
    let ui = expect_context::<RwSignal<EditorUi>>();

    let on_size_input = move |ev: leptos::ev::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<f64>() {
            ui.update(|u| u.set_brush_size(size));
        }
    };

    view! {
        <div class="tool-strip">
            <Show when=move || ui.with(|u| u.tool.is_brush())>
                <div class="tool-strip__slider">
                    <span class="tool-strip__slider-label">"Fine"</span>
                    <input
                        type="range"
                        min=BRUSH_SIZE_MIN
                        max=BRUSH_SIZE_MAX
                        prop:value=move || ui.with(|u| u.brush_size)
                        on:input=on_size_input
                    />
                    <span class="tool-strip__slider-label">"Broad"</span>
                    <span class="tool-strip__slider-value">
                        {move || format!("{:.0}px", ui.with(|u| u.brush_size))}
                    </span>
                </div>
            </Show>
            <div class="tool-strip__pill">
                <button
                    class=move || tool_button_class(ui.with(|u| u.tool == ActiveTool::Draw))
                    title="Paint the mask"
                    on:click=move |_| ui.update(|u| u.toggle_tool(ActiveTool::Draw))
                >
                    "Brush"
                </button>
                <button
                    class=move || tool_button_class(ui.with(|u| u.tool == ActiveTool::Select))
                    title="Select an area to edit"
                    on:click=move |_| ui.update(|u| u.toggle_tool(ActiveTool::Select))
                >
                    "Select"
                </button>
                <div class="tool-strip__divider"></div>
                <button
                    class=move || tool_button_class(ui.with(|u| u.brush_mode == BrushMode::Erase))
                    title="Eraser"
                    on:click=move |_| ui.update(EditorUi::toggle_brush_mode)
                >
                    "Eraser"
                </button>
            </div>
        </div>
    }
}
