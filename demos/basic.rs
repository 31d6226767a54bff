//=========================================================================
// Basic Demo
//=========================================================================
//
// Title screen → gameplay, with a pause overlay pushed on Escape.
//
// Run with logs:
//   RUST_LOG=debug cargo run --example basic
//
//=========================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, trace};

use kami_engine::prelude::*;

//=== Services ============================================================

/// Cross-scene state kept in the service registry.
struct Score {
    points: u32,
}

//=== Helpers =============================================================

/// A flag raised by a key handler and consumed by a scene's update.
fn key_latch(
    ctx: &mut GlobalContext,
    key: KeyCode,
) -> (Arc<AtomicBool>, HandlerHandle<KeyPressed>) {
    let flag = Arc::new(AtomicBool::new(false));
    let raise = flag.clone();

    let handle = ctx.input.on_filtered(
        move |_: &KeyPressed| raise.store(true, Ordering::SeqCst),
        move |e: &KeyPressed| e.key == key && !e.is_repeat,
    );

    (flag, handle)
}

//=== Title ===============================================================

struct Title {
    start: Arc<AtomicBool>,
    handle: HandlerHandle<KeyPressed>,
}

impl Title {
    fn new(ctx: &mut GlobalContext) -> Self {
        info!("Press Enter to start");
        let (start, handle) = key_latch(ctx, KeyCode::Enter);
        Self { start, handle }
    }
}

impl Scene for Title {
    fn update(&mut self, ctx: &mut GlobalContext, _dt: f64) {
        if self.start.swap(false, Ordering::SeqCst) {
            ctx.scene_transitions.replace(Gameplay::new);
        }
    }

    fn destroy(&mut self, ctx: &mut GlobalContext) {
        ctx.input.off(&self.handle);
    }
}

//=== Gameplay ============================================================

struct Gameplay {
    pause: Arc<AtomicBool>,
    handles: (HandlerHandle<KeyPressed>, HandlerHandle<MousePressed>),
    elapsed: f64,
}

impl Gameplay {
    fn new(ctx: &mut GlobalContext) -> Self {
        info!("Click to score, Escape to pause");
        let (pause, pause_handle) = key_latch(ctx, KeyCode::Escape);

        let click_handle = ctx.input.on(|e: &MousePressed| {
            info!("Click at ({:.0}, {:.0})", e.x, e.y);
        });

        Self {
            pause,
            handles: (pause_handle, click_handle),
            elapsed: 0.0,
        }
    }
}

impl Scene for Gameplay {
    fn update(&mut self, ctx: &mut GlobalContext, dt: f64) {
        self.elapsed += dt;

        if self.elapsed >= 1.0 {
            self.elapsed -= 1.0;
            if let Ok(score) = ctx.services.get_mut::<Score>() {
                score.points += 1;
            }
        }

        if self.pause.swap(false, Ordering::SeqCst) {
            ctx.scene_transitions.push(PauseMenu::new);
        }
    }

    fn pause(&mut self, ctx: &mut GlobalContext) {
        self.handles.0.set_active(false);
        self.handles.1.set_active(false);
        if let Ok(score) = ctx.services.get::<Score>() {
            info!("Paused with {} points", score.points);
        }
    }

    fn resume(&mut self, _ctx: &mut GlobalContext) {
        self.handles.0.set_active(true);
        self.handles.1.set_active(true);
        info!("Resumed");
    }

    fn destroy(&mut self, ctx: &mut GlobalContext) {
        ctx.input.off(&self.handles.0);
        ctx.input.off(&self.handles.1);
    }
}

//=== PauseMenu ===========================================================

struct PauseMenu {
    resume: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    handles: [HandlerHandle<KeyPressed>; 2],
    tint: Color,
}

impl PauseMenu {
    fn new(ctx: &mut GlobalContext) -> Self {
        info!("Paused: Escape resumes, Q returns to title");
        let (resume, resume_handle) = key_latch(ctx, KeyCode::Escape);
        let (quit, quit_handle) = key_latch(ctx, KeyCode::KeyQ);

        Self {
            resume,
            quit,
            handles: [resume_handle, quit_handle],
            tint: Color::interpolate(Color::TRANSPARENT, Color::BLACK, 0.6),
        }
    }
}

impl Scene for PauseMenu {
    fn is_sub_scene(&self) -> bool {
        true
    }

    fn update(&mut self, ctx: &mut GlobalContext, _dt: f64) {
        if self.quit.swap(false, Ordering::SeqCst) {
            ctx.scene_transitions.replace_all(Title::new);
        } else if self.resume.swap(false, Ordering::SeqCst) {
            ctx.scene_transitions.pop();
        }
    }

    fn draw(&mut self, _ctx: &mut GlobalContext) {
        trace!("Overlay tint {:?}", self.tint.parts());
    }

    fn destroy(&mut self, ctx: &mut GlobalContext) {
        for handle in &self.handles {
            ctx.input.off(handle);
        }
    }
}

//=== Entry Point =========================================================

fn main() {
    env_logger::init();

    EngineBuilder::new()
        .with_title("Kami - basic")
        .with_window_size(960, 540)
        .build()
        .init(|ctx| {
            ctx.services.add(Score { points: 0 });
            ctx.scene_transitions.push(Title::new);
        })
        .run();
}
