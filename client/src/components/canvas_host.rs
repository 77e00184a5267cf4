//! Bridge component between the Leptos UI and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns every drawing and viewport rule; this host maps DOM
//! events into engine calls and reacts to the returned actions. The working
//! image is a plain `<img>` under the transparent mask overlay canvas, both
//! inside a frame that zoom/pan move as a CSS transform. The engine instance
//! itself lives in an [`EngineHandle`] (reactive local storage, since the
//! engine owns JS values), so the generate and cancel flows elsewhere in the
//! editor can extract or wipe the mask.

use leptos::prelude::*;

use canvas::engine::Engine;
use canvas::mask::MaskError;

use crate::state::project::Project;
use crate::state::session::EditorSession;
use crate::state::ui::EditorUi;

#[cfg(feature = "hydrate")]
use canvas::camera::Point;
#[cfg(feature = "hydrate")]
use canvas::engine::Action;
#[cfg(feature = "hydrate")]
use canvas::input::{Button, Modifiers, WheelDelta};

/// Shared handle to the engine mounted by [`CanvasHost`].
///
/// Holds `None` until the overlay canvas mounts (and always off the
/// browser). Stored locally because the engine wraps a canvas element.
#[derive(Clone, Copy)]
pub struct EngineHandle(StoredValue<Option<Engine>, LocalStorage>);

impl EngineHandle {
    #[must_use]
    pub fn new() -> Self {
        Self(StoredValue::new_local(None))
    }

    /// Serialize the current mask. An unmounted engine reads as an empty
    /// surface, which the session reports as "mask unavailable".
    ///
    /// # Errors
    ///
    /// Propagates [`MaskError`] from the mask layer.
    pub fn mask_png(&self) -> Result<Vec<u8>, MaskError> {
        self.0
            .try_with_value(|slot| {
                slot.as_ref()
                    .map_or(Err(MaskError::EmptySurface), Engine::mask_png)
            })
            .unwrap_or(Err(MaskError::EmptySurface))
    }

    /// Wipe the mask overlay and repaint it.
    pub fn clear_mask(&self) {
        self.0.update_value(|slot| {
            if let Some(engine) = slot.as_mut() {
                engine.core.clear_mask();
                repaint(engine);
            }
        });
    }

    /// Run a closure over the mounted engine, if any.
    fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
        self.0
            .try_update_value(|slot| slot.as_mut().map(f))
            .flatten()
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn repaint(engine: &Engine) {
    if let Err(e) = engine.render() {
        log::warn!("overlay repaint failed: {e:?}");
    }
}

#[cfg(feature = "hydrate")]
fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[cfg(feature = "hydrate")]
fn map_button(button: i16) -> Button {
    match button {
        0 => Button::Primary,
        1 => Button::Middle,
        _ => Button::Secondary,
    }
}

/// Canvas host: the working image, the mask overlay, and all pointer wiring.
#[component]
pub fn CanvasHost() -> impl IntoView {
    let project = expect_context::<RwSignal<Project>>();
    let session = expect_context::<RwSignal<EditorSession>>();
    let ui = expect_context::<RwSignal<EditorUi>>();
    let handle = expect_context::<EngineHandle>();

    let img_ref = NodeRef::<leptos::html::Img>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Mirror of the engine camera for the CSS transform, and of gesture
    // state for the cursor.
    let view = RwSignal::new((1.0_f64, 0.0_f64, 0.0_f64));
    let panning = RwSignal::new(false);
    // Last (epoch, width, height) the engine was sized for.
    let loaded_for = RwSignal::new(None::<(u64, u32, u32)>);

    let working_image = move || {
        let active = session.with(|s| s.active);
        project
            .with(|p| p.image_at(active).map(str::to_owned))
            .unwrap_or_default()
    };

    // Mount the engine once the overlay canvas exists.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        handle.0.update_value(|slot| {
            if slot.is_none() {
                *slot = Some(Engine::new(canvas));
            }
        });
    });

    // Keep the engine's tool configuration in sync with the UI state.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let ui_state = ui.get();
        handle.with_engine(|engine| {
            engine.core.set_tool(ui_state.tool);
            engine.core.set_brush_mode(ui_state.brush_mode);
            engine.core.set_brush_size(ui_state.brush_size);
        });
    });

    // Size the engine whenever a newly uploaded image finishes layout. A
    // version switch keeps mask and view; a new upload (epoch bump) or a
    // different layout size resets both.
    let on_image_load = move |_ev: leptos::ev::Event| {
        let Some(img) = img_ref.get() else {
            return;
        };
        let width = u32::try_from(img.client_width()).unwrap_or(0);
        let height = u32::try_from(img.client_height()).unwrap_or(0);
        if width == 0 || height == 0 {
            return;
        }
        let epoch = ui.with_untracked(|u| u.base_epoch);
        if loaded_for.get_untracked() == Some((epoch, width, height)) {
            return;
        }
        handle.with_engine(|engine| {
            engine.load_image(width, height);
            view.set((1.0, 0.0, 0.0));
            repaint(engine);
        });
        loaded_for.set(Some((epoch, width, height)));
    };

    #[cfg(feature = "hydrate")]
    let process = move |actions: Vec<Action>| {
        let mut needs_repaint = false;
        for action in actions {
            match action {
                Action::RenderNeeded => needs_repaint = true,
                Action::ViewChanged => {
                    handle.with_engine(|engine| {
                        let cam = engine.core.camera();
                        view.set((cam.zoom, cam.pan_x, cam.pan_y));
                    });
                }
                Action::EditPromptRequested { screen } => {
                    ui.update(|u| u.open_popover(screen.x, screen.y));
                }
            }
        }
        handle.with_engine(|engine| {
            if needs_repaint {
                repaint(engine);
            }
            panning.set(engine.core.is_panning());
        });
    };

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get() {
                    if let Err(e) = canvas.set_pointer_capture(ev.pointer_id()) {
                        log::warn!("pointer capture failed: {e:?}");
                    }
                }
                let actions = handle.with_engine(|engine| {
                    let origin = engine.origin();
                    engine
                        .core
                        .on_pointer_down(pointer_point(&ev), origin, map_button(ev.button()))
                });
                if let Some(actions) = actions {
                    process(actions);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let actions = handle.with_engine(|engine| {
                    let origin = engine.origin();
                    engine.core.on_pointer_move(pointer_point(&ev), origin)
                });
                if let Some(actions) = actions {
                    process(actions);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let actions =
                    handle.with_engine(|engine| engine.core.on_pointer_up(pointer_point(&ev)));
                if let Some(actions) = actions {
                    process(actions);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let actions =
                    handle.with_engine(|engine| engine.core.on_pointer_leave(pointer_point(&ev)));
                if let Some(actions) = actions {
                    process(actions);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::WheelEvent| {
                let modifiers = Modifiers {
                    shift: ev.shift_key(),
                    ctrl: ev.ctrl_key(),
                    alt: ev.alt_key(),
                    meta: ev.meta_key(),
                };
                if modifiers.is_zoom_gesture() {
                    ev.prevent_default();
                }
                let actions = handle.with_engine(|engine| {
                    engine
                        .core
                        .on_wheel(WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() }, modifiers)
                });
                if let Some(actions) = actions {
                    process(actions);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let frame_style = move || {
        let (zoom, pan_x, pan_y) = view.get();
        format!("transform: translate({pan_x}px, {pan_y}px) scale({zoom});")
    };

    let cursor_class = move || {
        let has_image = project.with(|p| p.base_image.is_some());
        ui.with(|u| u.cursor_class(has_image, panning.get()))
    };

    view! {
        <div class="canvas-stage" on:wheel=on_wheel>
            <div class="canvas-stage__frame" style=frame_style>
                <img
                    class="canvas-stage__image"
                    node_ref=img_ref
                    src=working_image
                    draggable="false"
                    alt="Working image"
                    on:load=on_image_load
                />
                <canvas
                    class=move || format!("canvas-stage__overlay {}", cursor_class())
                    node_ref=canvas_ref
                    on:pointerdown=on_pointer_down
                    on:pointermove=on_pointer_move
                    on:pointerup=on_pointer_up
                    on:pointerleave=on_pointer_leave
                >
                    "Your browser does not support canvas."
                </canvas>
            </div>
        </div>
    }
}
