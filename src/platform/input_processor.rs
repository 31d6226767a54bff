//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Stateful tracking: caches modifier state from ModifiersChanged events,
// the last cursor position (for button coordinates and motion deltas), and
// the last position of every active touch. Unmapped keys (F13-F24, exotic
// keyboards) are filtered (returns None).
//
//=========================================================================

//=== Standard Library ====================================================

use std::collections::HashMap;

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{
    InputEvent, KeyCode, KeyPressed, KeyReleased, Modifiers, MouseButton, MouseMoved,
    MousePressed, MouseReleased, MouseWheel, Touch, TouchId, TouchMoved, TouchPressed,
    TouchReleased,
};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents with stateful tracking.
///
/// Filters unmapped keys and applies cached modifier state to key events.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
    cursor: Option<(f32, f32)>,
    touches: HashMap<u64, (f32, f32)>,
}

impl InputProcessor {
    /// Wheel pixel deltas are reported in lines of this height.
    const PIXELS_PER_LINE: f32 = 20.0;

    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
            cursor: None,
            touches: HashMap::new(),
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    #[cfg(test)]
    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(self.create_key_input_event(key_code, key_event.state, key_event.repeat))
    }

    //--- Mouse ------------------------------------------------------------

    /// Converts a Winit button event, positioned at the last known cursor.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        let (x, y) = self.cursor.unwrap_or((0.0, 0.0));

        match state {
            ElementState::Pressed => InputEvent::MousePressed(MousePressed {
                x,
                y,
                button,
                is_touch: false,
            }),
            ElementState::Released => InputEvent::MouseReleased(MouseReleased { x, y, button }),
        }
    }

    /// Creates a motion event; the delta is zero for the first sample.
    pub(crate) fn process_mouse_move(&mut self, x: f32, y: f32) -> InputEvent {
        let (last_x, last_y) = self.cursor.replace((x, y)).unwrap_or((x, y));

        InputEvent::MouseMoved(MouseMoved {
            x,
            y,
            dx: x - last_x,
            dy: y - last_y,
            is_touch: false,
        })
    }

    /// Converts a wheel delta to lines.
    pub(crate) fn process_mouse_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x, y),
            MouseScrollDelta::PixelDelta(position) => (
                position.x as f32 / Self::PIXELS_PER_LINE,
                position.y as f32 / Self::PIXELS_PER_LINE,
            ),
        };

        InputEvent::MouseWheel(MouseWheel { dx, dy })
    }

    /// Forgets the cursor position (cursor left the window).
    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    //--- Touch ------------------------------------------------------------

    /// Converts one touch sample, tracking per-finger deltas.
    ///
    /// `pressure` is `None` when the device reports no force.
    pub(crate) fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        pressure: Option<f32>,
    ) -> InputEvent {
        let (last_x, last_y) = self.touches.get(&id).copied().unwrap_or((x, y));

        let touch = Touch {
            id: TouchId(id),
            x,
            y,
            dx: x - last_x,
            dy: y - last_y,
            pressure: pressure.unwrap_or(1.0),
        };

        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, (x, y));
                InputEvent::TouchPressed(TouchPressed(touch))
            }
            TouchPhase::Moved => {
                self.touches.insert(id, (x, y));
                InputEvent::TouchMoved(TouchMoved(touch))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                InputEvent::TouchReleased(TouchReleased(touch))
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState, is_repeat: bool) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyPressed(KeyPressed {
                key,
                modifiers: self.current_modifiers,
                is_repeat,
            }),
            ElementState::Released => InputEvent::KeyReleased(KeyReleased {
                key,
                modifiers: self.current_modifiers,
            }),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to engine Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Converts Winit physical key codes to engine key codes.
///
/// Unmapped keys (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Function Row -------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft,
            ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft,
            AltRight => KeyCode::AltRight,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(code) => MouseButton::Other(code),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
