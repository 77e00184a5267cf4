//! Mask-drawing and viewport engine for the home-staging editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the mask overlay's full lifecycle: translating raw DOM pointer events
//! into brush strokes on a CPU-side raster, maintaining zoom/pan state for
//! the viewport, deciding when a finished stroke should open the edit
//! prompt, and serializing the mask for the generation request. The host UI
//! layer is responsible only for wiring DOM events to the engine and
//! reacting to the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`mask`] | Mask raster layer: strokes, emptiness, PNG extraction |
//! | [`camera`] | Zoom/pan view transform and coordinate mapping |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Overlay blit (the only `web_sys` drawing code) |
//! | [`consts`] | Shared numeric constants (zoom limits, brush range, etc.) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod input;
pub mod mask;
pub mod render;
