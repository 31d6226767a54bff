//=========================================================================
// Input Buffer
//
// Collects converted input events between two frame boundaries and splits
// them into two categories: discrete and continuous. Acts as a transient
// aggregator between the Platform and the core thread.
//
// Responsibilities:
// - Keep discrete inputs (keys, buttons, touches) in arrival order
// - Coalesce continuous inputs (cursor motion, wheel) per kind
// - Hand over the collected frame via `drain()`
//
// Notes:
// The buffer keeps its allocations across frames; `drain()` and
// `clear()` only reset lengths.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Represents the transient event store for one frame of input.
//
// Internally maintains:
// - `discrete`: one-shot inputs, every occurrence kept
// - `continuous`: at most one accumulated event per continuous kind
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for typical per-frame volumes.
    //
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Routes by kind: continuous events merge into the pending event of
    // the same kind, everything else is appended.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        self.discrete.push(event);
    }

    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        if !self.continuous.iter_mut().any(|pending| pending.coalesce(&event)) {
            self.continuous.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `None` when nothing was buffered, so empty frames are never
    // sent across the channel.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        Some((
            self.discrete.drain(..).collect(),
            self.continuous.drain(..).collect(),
        ))
    }

    //--- Utilities --------------------------------------------------------
    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, KeyPressed, Modifiers, MouseMoved, MouseWheel};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyPressed(KeyPressed {
            key,
            modifiers: Modifiers::NONE,
            is_repeat: false,
        })
    }

    fn mouse_move(x: f32, y: f32, dx: f32, dy: f32) -> InputEvent {
        InputEvent::MouseMoved(MouseMoved { x, y, dx, dy, is_touch: false })
    }

    fn wheel(dx: f32, dy: f32) -> InputEvent {
        InputEvent::MouseWheel(MouseWheel { dx, dy })
    }

    #[test]
    fn test_discrete_keeps_every_event_in_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyB));

        let (discrete, continuous) = buffer.drain().unwrap();
        assert_eq!(
            discrete,
            vec![key_down(KeyCode::KeyA), key_down(KeyCode::KeyA), key_down(KeyCode::KeyB)]
        );
        assert!(continuous.is_empty());
    }

    #[test]
    fn test_continuous_motion_coalesces() {
        let mut buffer = InputBuffer::new();

        buffer.push(mouse_move(10.0, 10.0, 1.0, 2.0));
        buffer.push(mouse_move(20.0, 30.0, 3.0, 4.0));

        assert_eq!(buffer.len(), 1, "Motion should collapse into one event");

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous, vec![mouse_move(20.0, 30.0, 4.0, 6.0)]);
    }

    #[test]
    fn test_motion_and_wheel_kept_apart() {
        let mut buffer = InputBuffer::new();

        buffer.push(wheel(0.0, 1.0));
        buffer.push(mouse_move(5.0, 5.0, 0.0, 0.0));
        buffer.push(wheel(0.5, 2.0));

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous, vec![wheel(0.5, 3.0), mouse_move(5.0, 5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(mouse_move(5.0, 5.0, 0.0, 0.0));

        let (discrete, continuous) = buffer.drain().unwrap();
        assert_eq!(discrete.len() + continuous.len(), 2);
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn test_empty_drain_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn test_clear_behavior() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(mouse_move(1.0, 2.0, 0.0, 0.0));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    //--- Memory Retention -------------------------------------------------
    //
    // `clear()` keeps the underlying storage for reuse across frames.
    //
    #[test]
    fn test_clear_does_not_deallocate() {
        let mut buffer = InputBuffer::new();

        for _ in 0..256 {
            buffer.push_discrete(key_down(KeyCode::Unidentified));
        }

        let vec_cap_before = buffer.discrete.capacity();

        buffer.clear();

        assert_eq!(buffer.discrete.len(), 0);
        assert_eq!(buffer.discrete.capacity(), vec_cap_before);
    }
}
