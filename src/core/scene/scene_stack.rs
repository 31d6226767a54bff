//=========================================================================
// Scene Stack
//=========================================================================
//
// Owns the scene instances and drives the per-frame phases.
//
// The stack is mutated only at the start of `pre_update`, so every other
// phase of a frame observes the same current scene. Scenes removed from
// the stack are destroyed and dropped immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::transition::PendingTransition;
use super::Scene;
use crate::core::globals::GlobalContext;

//=== Scene Stack =========================================================

/// Stack-based scene runtime.
///
/// The last scene in the stack is the current scene: the only one that
/// receives update phases. Transitions are requested through
/// [`GlobalContext::scene_transitions`] and applied here at most once per
/// frame.
///
/// | kind        | effect                                                    |
/// |-------------|-----------------------------------------------------------|
/// | push        | `pause` current, build new scene, push it                 |
/// | replace     | `destroy` and remove current, build new scene, push it    |
/// | replace-all | `destroy` every scene top first, build new scene, push it |
/// | pop         | `destroy` and remove current, `resume` the new current    |
pub struct SceneStack {
    stack: Vec<Box<dyn Scene>>,
}

impl SceneStack {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scene stack.
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    //--- Frame Phases -----------------------------------------------------

    /// Resolves the pending transition, then runs `pre_update` on the
    /// current scene.
    pub fn pre_update(&mut self, ctx: &mut GlobalContext, dt: f64) {
        if let Some(transition) = ctx.scene_transitions.take() {
            self.resolve(transition, ctx);
        }

        if let Some(scene) = self.stack.last_mut() {
            scene.pre_update(ctx, dt);
        }
    }

    /// Runs `update` on the current scene.
    pub fn update(&mut self, ctx: &mut GlobalContext, dt: f64) {
        if let Some(scene) = self.stack.last_mut() {
            scene.update(ctx, dt);
        }
    }

    /// Runs `post_update` on the current scene.
    pub fn post_update(&mut self, ctx: &mut GlobalContext, dt: f64) {
        if let Some(scene) = self.stack.last_mut() {
            scene.post_update(ctx, dt);
        }
    }

    /// Draws the current scene, preceded by the scene beneath it when the
    /// current one is a sub-scene.
    pub fn draw(&mut self, ctx: &mut GlobalContext) {
        let Some((current, below)) = self.stack.split_last_mut() else {
            return;
        };

        if current.is_sub_scene() {
            if let Some(under) = below.last_mut() {
                under.draw(ctx);
            }
        }

        current.draw(ctx);
    }

    //--- Query API --------------------------------------------------------

    /// Returns the current (top) scene.
    pub fn current(&self) -> Option<&dyn Scene> {
        self.stack.last().map(|scene| scene.as_ref())
    }

    /// Returns the current (top) scene mutably.
    pub fn current_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.stack.last_mut().map(|scene| scene.as_mut())
    }

    /// Returns the number of scenes in the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    //--- Shutdown ---------------------------------------------------------

    /// Destroys every scene, top first, leaving the stack empty.
    ///
    /// Used when the frame driver stops, so scenes still on the stack get
    /// their single `destroy` call.
    pub fn destroy_all(&mut self, ctx: &mut GlobalContext) {
        if !self.stack.is_empty() {
            debug!(target: "scene", "Destroying {} remaining scene(s)", self.stack.len());
        }
        self.pop_all(ctx);
    }

    //--- Transition Resolution --------------------------------------------

    fn resolve(&mut self, transition: PendingTransition, ctx: &mut GlobalContext) {
        let kind = transition.kind();
        let depth_before = self.stack.len();

        match transition {
            PendingTransition::Pop => {
                self.pop_top(ctx);

                if let Some(scene) = self.stack.last_mut() {
                    scene.resume(ctx);
                }
            }
            PendingTransition::Push(factory) => {
                if let Some(scene) = self.stack.last_mut() {
                    scene.pause(ctx);
                }

                let scene = factory(ctx);
                self.stack.push(scene);
            }
            PendingTransition::Replace(factory) => {
                self.pop_top(ctx);

                let scene = factory(ctx);
                self.stack.push(scene);
            }
            PendingTransition::ReplaceAll(factory) => {
                self.pop_all(ctx);

                let scene = factory(ctx);
                self.stack.push(scene);
            }
        }

        debug!(
            target: "scene",
            "Resolved {} transition (depth {} -> {})",
            kind,
            depth_before,
            self.stack.len()
        );
    }

    /// Removes the top scene and destroys it. No-op on an empty stack.
    fn pop_top(&mut self, ctx: &mut GlobalContext) {
        if let Some(mut scene) = self.stack.pop() {
            scene.destroy(ctx);
        }
    }

    fn pop_all(&mut self, ctx: &mut GlobalContext) {
        while let Some(mut scene) = self.stack.pop() {
            scene.destroy(ctx);
        }
    }
}

impl Default for SceneStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStack")
            .field("depth", &self.stack.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    //--- Recording Scene --------------------------------------------------

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
        sub_scene: bool,
    }

    impl Probe {
        fn note(&self, hook: &str) {
            self.journal.lock().unwrap().push(format!("{}.{}", self.name, hook));
        }
    }

    impl Scene for Probe {
        fn is_sub_scene(&self) -> bool {
            self.sub_scene
        }
        fn pre_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.note("pre_update");
        }
        fn update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.note("update");
        }
        fn post_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.note("post_update");
        }
        fn draw(&mut self, _ctx: &mut GlobalContext) {
            self.note("draw");
        }
        fn pause(&mut self, _ctx: &mut GlobalContext) {
            self.note("pause");
        }
        fn resume(&mut self, _ctx: &mut GlobalContext) {
            self.note("resume");
        }
        fn destroy(&mut self, _ctx: &mut GlobalContext) {
            self.note("destroy");
        }
    }

    fn probe(name: &'static str, journal: &Journal) -> impl FnOnce(&mut GlobalContext) -> Probe + Send + 'static {
        let journal = journal.clone();
        move |_ctx: &mut GlobalContext| Probe { name, journal, sub_scene: false }
    }

    fn overlay(name: &'static str, journal: &Journal) -> impl FnOnce(&mut GlobalContext) -> Probe + Send + 'static {
        let journal = journal.clone();
        move |_ctx: &mut GlobalContext| Probe { name, journal, sub_scene: true }
    }

    fn take(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    /// Resolves the pending transition without recording the pre_update hook.
    fn settle(stack: &mut SceneStack, ctx: &mut GlobalContext, journal: &Journal) {
        stack.pre_update(ctx, 0.0);
        journal
            .lock()
            .unwrap()
            .retain(|entry| !entry.ends_with(".pre_update"));
    }

    //--- Phase Forwarding -------------------------------------------------

    #[test]
    fn empty_stack_phases_are_noops() {
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        stack.pre_update(&mut ctx, 0.016);
        stack.update(&mut ctx, 0.016);
        stack.post_update(&mut ctx, 0.016);
        stack.draw(&mut ctx);

        assert!(stack.is_empty());
        assert!(stack.current().is_none());
    }

    #[test]
    fn phases_reach_only_the_current_scene() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        stack.pre_update(&mut ctx, 0.1);
        stack.update(&mut ctx, 0.1);
        stack.post_update(&mut ctx, 0.1);
        stack.draw(&mut ctx);

        assert_eq!(take(&journal), vec!["b.pre_update", "b.update", "b.post_update", "b.draw"]);
    }

    #[test]
    fn transition_waits_for_next_pre_update() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        stack.update(&mut ctx, 0.0);
        stack.post_update(&mut ctx, 0.0);
        stack.draw(&mut ctx);
        assert!(stack.is_empty());

        stack.pre_update(&mut ctx, 0.0);
        assert_eq!(stack.len(), 1);
        assert_eq!(take(&journal), vec!["a.pre_update"]);
        assert!(!ctx.scene_transitions.is_pending());
    }

    //--- Drawing ----------------------------------------------------------

    #[test]
    fn sub_scene_draws_scene_beneath_first() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("game", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(overlay("menu", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        stack.draw(&mut ctx);
        assert_eq!(take(&journal), vec!["game.draw", "menu.draw"]);
    }

    #[test]
    fn lone_sub_scene_draws_itself() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(overlay("menu", &journal));
        settle(&mut stack, &mut ctx, &journal);

        stack.draw(&mut ctx);
        assert_eq!(take(&journal), vec!["menu.draw"]);
    }

    #[test]
    fn opaque_scene_hides_scene_beneath() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        stack.draw(&mut ctx);
        assert_eq!(take(&journal), vec!["b.draw"]);
    }

    //--- Transition Resolution --------------------------------------------

    #[test]
    fn push_pauses_previous_scene() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["a.pause"]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_destroys_and_resumes() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        ctx.scene_transitions.pop();
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["b.destroy", "a.resume"]);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn pop_last_scene_leaves_empty_stack() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);

        ctx.scene_transitions.pop();
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["a.destroy"]);
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_stack_is_noop() {
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.pop();
        stack.pre_update(&mut ctx, 0.0);

        assert!(stack.is_empty());
        assert!(!ctx.scene_transitions.is_pending());
    }

    #[test]
    fn replace_destroys_without_resume() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        ctx.scene_transitions.replace(probe("c", &journal));
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["b.destroy"]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn replace_on_empty_stack_pushes() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.replace(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);

        assert!(take(&journal).is_empty());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn replace_all_destroys_top_down() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        for name in ["a", "b", "c"] {
            ctx.scene_transitions.push(probe(name, &journal));
            settle(&mut stack, &mut ctx, &journal);
        }
        take(&journal);

        ctx.scene_transitions.replace_all(probe("d", &journal));
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["c.destroy", "b.destroy", "a.destroy"]);
        assert_eq!(stack.len(), 1);

        stack.update(&mut ctx, 0.0);
        assert_eq!(take(&journal), vec!["d.update"]);
    }

    #[test]
    fn destroy_runs_before_factory_on_replace() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        let log = journal.clone();
        ctx.scene_transitions.replace(move |_ctx| {
            log.lock().unwrap().push("factory".to_string());
            Probe { name: "b", journal: log, sub_scene: false }
        });
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(take(&journal), vec!["a.destroy", "factory"]);
    }

    #[test]
    fn only_last_request_is_applied() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);

        assert_eq!(stack.len(), 1);
        stack.update(&mut ctx, 0.0);
        assert_eq!(take(&journal), vec!["b.update"]);
    }

    #[test]
    fn request_made_during_resolution_waits_a_frame() {
        struct PopOnDestroy;
        impl Scene for PopOnDestroy {
            fn destroy(&mut self, ctx: &mut GlobalContext) {
                ctx.scene_transitions.pop();
            }
        }

        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(|_| PopOnDestroy);
        stack.pre_update(&mut ctx, 0.0);

        ctx.scene_transitions.replace(probe("a", &journal));
        stack.pre_update(&mut ctx, 0.0);

        assert_eq!(stack.len(), 1);
        assert!(ctx.scene_transitions.is_pending());

        stack.pre_update(&mut ctx, 0.0);
        assert!(stack.is_empty());
    }

    #[test]
    fn factory_receives_context() {
        struct Score(u32);
        struct Board;
        impl Scene for Board {}

        let mut ctx = GlobalContext::new();
        ctx.services.add(Score(7));
        let mut stack = SceneStack::new();

        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        ctx.scene_transitions.push(move |ctx: &mut GlobalContext| {
            *sink.lock().unwrap() = ctx.services.get::<Score>().ok().map(|s| s.0);
            Board
        });
        stack.pre_update(&mut ctx, 0.0);

        assert_eq!(stack.len(), 1);
        assert_eq!(*seen.lock().unwrap(), Some(7));
    }

    //--- Shutdown ---------------------------------------------------------

    #[test]
    fn destroy_all_destroys_each_scene_once() {
        let journal = Journal::default();
        let mut ctx = GlobalContext::new();
        let mut stack = SceneStack::new();

        ctx.scene_transitions.push(probe("a", &journal));
        settle(&mut stack, &mut ctx, &journal);
        ctx.scene_transitions.push(probe("b", &journal));
        settle(&mut stack, &mut ctx, &journal);
        take(&journal);

        stack.destroy_all(&mut ctx);
        stack.destroy_all(&mut ctx);

        assert_eq!(take(&journal), vec!["b.destroy", "a.destroy"]);
        assert!(stack.is_empty());
    }
}
