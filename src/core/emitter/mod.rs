//=========================================================================
// Event Emitter
//=========================================================================
//
// Typed publish/subscribe with per-handler filters and activation flags.
//
// Architecture:
//   on<E>() ──► HashMap<TypeId, Vec<Handler<E>>> ──► emit<E>() ──► callbacks
//                         ▲
//   off<E>(handle) ───────┘ (by identity)
//
// Used internally for input routing and available to application code.
//
//=========================================================================

//=== Module Declarations =================================================

mod emitter;
mod handler_set;

//=== Public API ==========================================================

pub use emitter::{Emitter, HandlerHandle, HandlerId};

//=== Event Trait =========================================================

/// Marker trait for types that can be emitted through an [`Emitter`].
///
/// The event *type* is the event name: registering for `KeyPressed` only
/// ever receives `KeyPressed` payloads. Automatically implemented for all
/// `Send + 'static` types.
pub trait Event: Send + 'static {}

// Blanket implementation
impl<T: Send + 'static> Event for T {}
