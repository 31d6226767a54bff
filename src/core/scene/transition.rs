//=========================================================================
// Scene Transitions
//=========================================================================
//
// Single-slot holder for the next scene transition.
//
// Scenes (and the application during init) record a request here. The
// scene stack takes it at the start of the next frame's `pre_update`.
// A new request overwrites an unresolved one; requests never queue.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;

//=== TransitionKind ======================================================

/// The four ways the scene stack can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Pause the current scene and push a new one above it.
    Push,

    /// Destroy the current scene and put a new one in its place.
    Replace,

    /// Destroy every scene, top first, then push a new one.
    ReplaceAll,

    /// Destroy the current scene and resume the one beneath it.
    Pop,
}

impl TransitionKind {
    /// Returns true for kinds that instantiate a new scene.
    pub fn needs_factory(self) -> bool {
        !matches!(self, Self::Pop)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Push => "push",
            Self::Replace => "replace",
            Self::ReplaceAll => "replace-all",
            Self::Pop => "pop",
        };
        f.write_str(name)
    }
}

//=== SceneFactory ========================================================

/// Builds a scene when its transition is resolved.
///
/// Runs on the logic thread with access to the shared context, so a new
/// scene can fetch services or register input handlers as it is created.
pub type SceneFactory = Box<dyn FnOnce(&mut GlobalContext) -> Box<dyn Scene> + Send>;

//=== SceneError ==========================================================

/// Contract violations reported when a transition is requested.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// `push`, `replace` and `replace-all` need a scene to instantiate.
    #[error("a {0} transition requires a scene factory")]
    MissingFactory(TransitionKind),
}

//=== PendingTransition ===================================================

/// A recorded request, consumed by the scene stack.
pub(crate) enum PendingTransition {
    Push(SceneFactory),
    Replace(SceneFactory),
    ReplaceAll(SceneFactory),
    Pop,
}

impl PendingTransition {
    pub(crate) fn kind(&self) -> TransitionKind {
        match self {
            Self::Push(_) => TransitionKind::Push,
            Self::Replace(_) => TransitionKind::Replace,
            Self::ReplaceAll(_) => TransitionKind::ReplaceAll,
            Self::Pop => TransitionKind::Pop,
        }
    }
}

impl fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PendingTransition({})", self.kind())
    }
}

//=== SceneTransitions ====================================================

/// Holds at most one pending scene transition.
///
/// # Example
///
/// ```rust
/// # use kami_engine::prelude::*;
/// # struct Menu;
/// # impl Scene for Menu {}
/// let mut transitions = SceneTransitions::new();
///
/// transitions.push(|_ctx| Menu);
/// transitions.pop(); // overwrites the push
///
/// assert_eq!(transitions.pending_kind(), Some(TransitionKind::Pop));
/// ```
#[derive(Debug, Default)]
pub struct SceneTransitions {
    pending: Option<PendingTransition>,
}

impl SceneTransitions {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { pending: None }
    }

    //--- Requests ---------------------------------------------------------

    /// Records a transition of `kind`, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingFactory`] when `kind` instantiates a
    /// scene and `factory` is `None`. The pending request is left as is.
    /// A factory passed with [`TransitionKind::Pop`] is dropped.
    pub fn switch_to(
        &mut self,
        kind: TransitionKind,
        factory: Option<SceneFactory>,
    ) -> Result<(), SceneError> {
        let request = match (kind, factory) {
            (TransitionKind::Pop, factory) => {
                if factory.is_some() {
                    warn!(target: "scene", "Factory passed to a pop transition was ignored");
                }
                PendingTransition::Pop
            }
            (kind, None) => return Err(SceneError::MissingFactory(kind)),
            (TransitionKind::Push, Some(f)) => PendingTransition::Push(f),
            (TransitionKind::Replace, Some(f)) => PendingTransition::Replace(f),
            (TransitionKind::ReplaceAll, Some(f)) => PendingTransition::ReplaceAll(f),
        };

        self.record(request);
        Ok(())
    }

    /// Requests that a scene built by `factory` be pushed above the current one.
    pub fn push<S, F>(&mut self, factory: F)
    where
        S: Scene + 'static,
        F: FnOnce(&mut GlobalContext) -> S + Send + 'static,
    {
        self.record(PendingTransition::Push(boxed(factory)));
    }

    /// Requests that the current scene be replaced by one built by `factory`.
    pub fn replace<S, F>(&mut self, factory: F)
    where
        S: Scene + 'static,
        F: FnOnce(&mut GlobalContext) -> S + Send + 'static,
    {
        self.record(PendingTransition::Replace(boxed(factory)));
    }

    /// Requests that the whole stack be replaced by one scene built by `factory`.
    pub fn replace_all<S, F>(&mut self, factory: F)
    where
        S: Scene + 'static,
        F: FnOnce(&mut GlobalContext) -> S + Send + 'static,
    {
        self.record(PendingTransition::ReplaceAll(boxed(factory)));
    }

    /// Requests that the current scene be popped.
    pub fn pop(&mut self) {
        self.record(PendingTransition::Pop);
    }

    /// Drops the pending request, if any.
    pub fn cancel(&mut self) {
        if let Some(dropped) = self.pending.take() {
            debug!(target: "scene", "Cancelled pending {} transition", dropped.kind());
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns the kind of the pending request.
    pub fn pending_kind(&self) -> Option<TransitionKind> {
        self.pending.as_ref().map(PendingTransition::kind)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Removes the pending request, leaving the slot empty.
    pub(crate) fn take(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    fn record(&mut self, request: PendingTransition) {
        let kind = request.kind();

        if let Some(previous) = self.pending.replace(request) {
            debug!(
                target: "scene",
                "Pending {} transition overwritten by {}",
                previous.kind(),
                kind
            );
        }
    }
}

fn boxed<S, F>(factory: F) -> SceneFactory
where
    S: Scene + 'static,
    F: FnOnce(&mut GlobalContext) -> S + Send + 'static,
{
    Box::new(move |ctx: &mut GlobalContext| Box::new(factory(ctx)) as Box<dyn Scene>)
}

//=========================================================================
// Tests
//=========================================================================
