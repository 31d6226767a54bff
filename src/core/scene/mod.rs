//=========================================================================
// Scene System
//=========================================================================
//
// Stack of mutually exclusive scenes with deferred transitions.
//
// Architecture:
//   SceneStack
//     └─ stack: Vec<Box<dyn Scene>>   (last = current)
//   GlobalContext
//     └─ scene_transitions: SceneTransitions (one pending request)
//
// Flow (per frame):
//   pre_update() → resolve pending transition → current.pre_update()
//   update()     → current.update()
//   post_update()→ current.post_update()
//   draw()       → [scene below, if sub-scene] → current.draw()
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod scene_stack;
mod transition;

//=== Public API ==========================================================

pub use scene_stack::SceneStack;
pub use transition::{SceneError, SceneFactory, SceneTransitions, TransitionKind};

//=== Scene Trait =========================================================

/// A unit of exclusive application state driven by the [`SceneStack`].
///
/// Every hook has an empty default, so a scene only overrides what it
/// needs. Hooks receive the shared [`GlobalContext`], through which a
/// scene can reach services and input, or request a transition for the
/// next frame.
///
/// # Lifecycle
///
/// ```text
/// factory ─► [pre_update → update → post_update → draw]* ─► destroy
///                 │                          ▲
///                 └── pause ... resume ──────┘  (while covered by a push)
/// ```
///
/// `destroy` is called exactly once, when the scene leaves the stack.
/// A scene is never driven after `destroy`.
///
/// # Example
///
/// ```rust
/// # use kami_engine::prelude::*;
/// struct Title;
///
/// impl Scene for Title {
///     fn update(&mut self, ctx: &mut GlobalContext, _dt: f64) {
///         ctx.scene_transitions.push(|_ctx| Gameplay);
///     }
/// }
///
/// struct Gameplay;
/// impl Scene for Gameplay {}
/// ```
pub trait Scene: Send {
    /// Whether the scene directly beneath this one is drawn first.
    ///
    /// Overlay scenes (pause menus, dialogs) return `true`.
    fn is_sub_scene(&self) -> bool {
        false
    }

    /// Called at the start of every frame, after transitions are resolved.
    fn pre_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {}

    /// Called every frame while this scene is current.
    fn update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {}

    /// Called after `update` every frame while this scene is current.
    fn post_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {}

    /// Called once per frame while current, or while covered by a sub-scene.
    fn draw(&mut self, _ctx: &mut GlobalContext) {}

    /// Called when another scene is pushed above this one.
    fn pause(&mut self, _ctx: &mut GlobalContext) {}

    /// Called when the scene above is popped and this one is current again.
    fn resume(&mut self, _ctx: &mut GlobalContext) {}

    /// Called once when the scene is permanently removed from the stack.
    fn destroy(&mut self, _ctx: &mut GlobalContext) {}
}
