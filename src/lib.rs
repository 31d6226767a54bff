//=========================================================================
// Kami Engine - Library Root
//
// This crate defines the public API surface of the Kami Engine: a scene
// stack runtime and a typed event dispatcher on top of a winit window.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the scene, input, emitter and service APIs under `core`
// - Keep the windowing layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use kami_engine::prelude::*;
//
// struct Title;
// impl Scene for Title {}
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .init(|ctx| ctx.scene_transitions.push(|_ctx| Title))
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine systems scenes interact with (scene stack,
// emitter, input, services). `prelude` re-exports the common subset.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit integration (window, event loop, input
// conversion) and is not part of the public API surface.
//
// `engine` defines the main engine entry point and initialization logic.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
