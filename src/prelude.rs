//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use kami_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Shared context and services
pub use crate::core::globals::GlobalContext;
pub use crate::core::services::{ServiceError, Services};

// Scene system
pub use crate::core::scene::{Scene, SceneError, SceneStack, SceneTransitions, TransitionKind};

// Event dispatch
pub use crate::core::emitter::{Emitter, Event, HandlerHandle};

// Input system
pub use crate::core::input::{
    Input, InputDevice, KeyCode, KeyPressed, KeyReleased, Modifiers, MouseButton, MouseMoved,
    MousePressed, MouseReleased, MouseWheel, TouchMoved, TouchPressed, TouchReleased,
};

// Graphics values
pub use crate::core::graphics::Color;
