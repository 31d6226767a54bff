//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the shared `GlobalContext` and the `SceneStack`
// - Receive platform batches via the crossbeam channel
// - Route input to handlers, then drive the scene phases
// - Maintain deterministic pacing using a fixed tick rate (TPS)
//
// Notes:
// The orchestrator runs independently from the platform layer.
// Communication with the platform occurs only through message passing,
// so scenes and handlers never touch windowing types.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::info;

//=== Module Declarations =================================================

pub mod emitter;
pub mod globals;
pub mod graphics;
pub mod input;
pub mod scene;
pub mod services;

pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use emitter::{Emitter, Event, HandlerHandle, HandlerId};
pub use globals::GlobalContext;
pub use graphics::Color;
pub use input::{Input, InputDevice, InputEvent};
pub use scene::{Scene, SceneError, SceneFactory, SceneStack, SceneTransitions, TransitionKind};
pub use services::{ServiceError, Services};

//=== Internal Modules ====================================================
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================
//
// Owns the scene runtime and the context scenes operate on. The two are
// kept apart so scene hooks can borrow the context mutably while the stack
// itself is being driven.
//
pub(crate) struct CoreSystemsOrchestrator {
    context: GlobalContext,
    scenes: SceneStack,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            context: GlobalContext::new(),
            scenes: SceneStack::new(),
        }
    }

    //--- init_systems() ---------------------------------------------------
    //
    // One-shot setup hook run before the logic thread starts: register
    // services, input handlers, and request the first scene.
    //
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalContext),
    {
        init_fn(&mut self.context);
    }

    //--- tick() -----------------------------------------------------------
    //
    // Runs one frame of scene phases in fixed order. Any transition
    // requested by the previous frame is applied at the start of
    // `pre_update`.
    //
    pub fn tick(&mut self, dt: f64) {
        let ctx = &mut self.context;

        self.scenes.pre_update(ctx, dt);
        self.scenes.update(ctx, dt);
        self.scenes.post_update(ctx, dt);
        self.scenes.draw(ctx);
    }

    /// Emits each platform-normalized input event to the typed handlers.
    pub fn route_input(&mut self, events: &[InputEvent]) {
        for event in events {
            self.context.input.route(event);
        }
    }

    /// Destroys every scene still on the stack.
    pub fn shutdown(&mut self) {
        self.scenes.destroy_all(&mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread ticking at a fixed frequency.
    //
    // Each tick:
    //  1. Collects platform events (exits on close or disconnect)
    //  2. Routes input to registered handlers
    //  3. Runs the scene phases with the measured frame time
    //  4. Sleeps to maintain fixed pacing
    //
    pub fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2: Dispatch input -------------------------------
                self.route_input(collector.events());

                //--- Step 3: Drive scenes ---------------------------------
                let dt = frame_start.duration_since(last_tick).as_secs_f64();
                last_tick = frame_start;
                self.tick(dt);

                //--- Step 4: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            self.shutdown();
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, KeyPressed, Modifiers};
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        journal: Journal,
    }

    impl Scene for Recorder {
        fn pre_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.journal.lock().unwrap().push("pre_update".into());
        }
        fn update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.journal.lock().unwrap().push("update".into());
        }
        fn post_update(&mut self, _ctx: &mut GlobalContext, _dt: f64) {
            self.journal.lock().unwrap().push("post_update".into());
        }
        fn draw(&mut self, _ctx: &mut GlobalContext) {
            self.journal.lock().unwrap().push("draw".into());
        }
        fn destroy(&mut self, _ctx: &mut GlobalContext) {
            self.journal.lock().unwrap().push("destroy".into());
        }
    }

    fn orchestrator_with_recorder(journal: &Journal) -> CoreSystemsOrchestrator {
        let mut orchestrator = CoreSystemsOrchestrator::new();
        let journal = journal.clone();
        orchestrator.init_systems(move |ctx| {
            ctx.scene_transitions.push(move |_ctx: &mut GlobalContext| Recorder { journal });
        });
        orchestrator
    }

    #[test]
    fn tick_runs_phases_in_order() {
        let journal = Journal::default();
        let mut orchestrator = orchestrator_with_recorder(&journal);

        orchestrator.tick(1.0 / 60.0);

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["pre_update", "update", "post_update", "draw"]
        );
    }

    #[test]
    fn shutdown_destroys_remaining_scenes() {
        let journal = Journal::default();
        let mut orchestrator = orchestrator_with_recorder(&journal);

        orchestrator.tick(0.0);
        journal.lock().unwrap().clear();
        orchestrator.shutdown();

        assert_eq!(*journal.lock().unwrap(), vec!["destroy"]);
    }

    #[test]
    fn route_input_reaches_typed_handlers() {
        let mut orchestrator = CoreSystemsOrchestrator::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        orchestrator.init_systems(move |ctx| {
            ctx.input.on(move |e: &KeyPressed| sink.lock().unwrap().push(e.key));
        });

        let event = InputEvent::KeyPressed(KeyPressed {
            key: KeyCode::Escape,
            modifiers: Modifiers::NONE,
            is_repeat: false,
        });
        orchestrator.route_input(&[event]);

        assert_eq!(*seen.lock().unwrap(), vec![KeyCode::Escape]);
    }

    #[test]
    fn core_thread_exits_on_window_closed_before_first_tick() {
        let journal = Journal::default();
        let orchestrator = orchestrator_with_recorder(&journal);
        let (tx, rx) = unbounded();

        tx.send(PlatformEvent::WindowClosed).unwrap();
        let handle = orchestrator.spawn_core_thread(rx, 1000.0);
        handle.join().unwrap();

        // Closed before the first tick: the requested scene was never built.
        assert!(journal.lock().unwrap().is_empty());
    }

    #[test]
    fn core_thread_exits_on_disconnect() {
        let journal = Journal::default();
        let orchestrator = orchestrator_with_recorder(&journal);
        let (tx, rx) = unbounded::<PlatformEvent>();

        let handle = orchestrator.spawn_core_thread(rx, 1000.0);
        thread::sleep(Duration::from_millis(20));
        drop(tx);
        handle.join().unwrap();

        let journal = journal.lock().unwrap();
        assert!(journal.contains(&"update".to_string()));
        assert_eq!(journal.last().map(String::as_str), Some("destroy"));
    }
}
