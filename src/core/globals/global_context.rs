//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container handed to scenes.
//
// Contains state data that scenes read/write:
// - services: type-keyed application services
// - input: typed input dispatcher
// - scene_transitions: the pending scene change
//
// Constructed explicitly by the engine and passed by `&mut` to every scene
// hook and scene factory; there is no process-global state.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::input::Input;
use crate::core::scene::SceneTransitions;
use crate::core::services::Services;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during every hook.
///
/// # Available Data
///
/// - `services`: application objects retrievable by type
/// - `input`: register/unregister input handlers, toggle devices
/// - `scene_transitions`: request the next scene change
#[derive(Debug, Default)]
pub struct GlobalContext {
    /// Type-keyed service registry.
    pub services: Services,

    /// Input dispatcher fed by the platform layer each tick.
    pub input: Input,

    /// Pending scene transition, resolved at the next `pre_update`.
    pub scene_transitions: SceneTransitions,
}

impl GlobalContext {
    /// Creates a context with no services, no handlers and nothing pending.
    pub fn new() -> Self {
        Self {
            services: Services::new(),
            input: Input::new(),
            scene_transitions: SceneTransitions::new(),
        }
    }

    /// Starts a new session: drops all services, input handlers and any
    /// pending transition. Device enable flags are kept.
    pub fn reset(&mut self) {
        info!("Resetting global context");

        self.services.clear();
        self.input.clear();
        self.scene_transitions.cancel();
    }
}

//=========================================================================
// Tests
//=========================================================================
