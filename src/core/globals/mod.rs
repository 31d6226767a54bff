//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates the scene runtime (owned by the orchestrator) from the shared
// data scenes operate on.
//
// Architecture:
//   CoreSystemsOrchestrator: SceneStack (logic, owns scenes)
//   GlobalContext: Services + Input + SceneTransitions (passed to scenes)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
