//=========================================================================
// Input System
//
// Routes platform input to typed handlers registered by the application.
//
// Responsibilities:
// - Unpack platform-normalized `InputEvent`s into typed payloads
// - Drop events from device families that are switched off
// - Expose handler registration (`on`, `on_filtered`, `off`)
//
// Notes:
// `Input` lives in `GlobalContext`, so scenes register handlers from their
// factories and unregister them in `destroy`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{
    DeviceEvent, GamepadAxis, GamepadAxisMoved, GamepadButton, GamepadConnected,
    GamepadDisconnected, GamepadPressed, GamepadReleased, HatDirection, InputDevice, InputEvent,
    JoystickAxis, JoystickConnected, JoystickDisconnected, JoystickHat, JoystickId,
    JoystickPressed, JoystickReleased, KeyCode, KeyPressed, KeyReleased, Modifiers, MouseButton,
    MouseMoved, MousePressed, MouseReleased, MouseWheel, Touch, TouchId, TouchMoved,
    TouchPressed, TouchReleased,
};

//=== Internal Imports ====================================================

use crate::core::emitter::{Emitter, HandlerHandle};

//=== External Crates =====================================================

use log::trace;

//=== Input ===============================================================

/// Typed input dispatcher with per-device switches.
///
/// # Example
///
/// ```
/// use kami_engine::core::input::{Input, KeyCode, KeyPressed, Modifiers};
/// use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
///
/// let jumped = Arc::new(AtomicBool::new(false));
/// let flag = jumped.clone();
///
/// let mut input = Input::new();
/// input.on_filtered(
///     move |_: &KeyPressed| flag.store(true, Ordering::SeqCst),
///     |e: &KeyPressed| e.key == KeyCode::Space,
/// );
///
/// input.emit(&KeyPressed { key: KeyCode::Space, modifiers: Modifiers::NONE, is_repeat: false });
/// assert!(jumped.load(Ordering::SeqCst));
/// ```
#[derive(Debug)]
pub struct Input {
    /// Keyboard events are delivered when true.
    pub keyboard_enabled: bool,

    /// Mouse events are delivered when true.
    pub mouse_enabled: bool,

    /// Touch events are delivered when true.
    pub touch_enabled: bool,

    /// Joystick events are delivered when true.
    pub joystick_enabled: bool,

    /// Gamepad events are delivered when true.
    pub gamepad_enabled: bool,

    emitter: Emitter,
}

impl Input {
    //--- Construction -----------------------------------------------------

    /// Creates an input dispatcher with every device enabled.
    pub fn new() -> Self {
        Self {
            keyboard_enabled: true,
            mouse_enabled: true,
            touch_enabled: true,
            joystick_enabled: true,
            gamepad_enabled: true,
            emitter: Emitter::new(),
        }
    }

    //--- Device Switches --------------------------------------------------

    pub fn is_enabled(&self, device: InputDevice) -> bool {
        match device {
            InputDevice::Keyboard => self.keyboard_enabled,
            InputDevice::Mouse => self.mouse_enabled,
            InputDevice::Touch => self.touch_enabled,
            InputDevice::Joystick => self.joystick_enabled,
            InputDevice::Gamepad => self.gamepad_enabled,
        }
    }

    pub fn set_enabled(&mut self, device: InputDevice, enabled: bool) {
        let flag = match device {
            InputDevice::Keyboard => &mut self.keyboard_enabled,
            InputDevice::Mouse => &mut self.mouse_enabled,
            InputDevice::Touch => &mut self.touch_enabled,
            InputDevice::Joystick => &mut self.joystick_enabled,
            InputDevice::Gamepad => &mut self.gamepad_enabled,
        };
        *flag = enabled;
    }

    //--- Registration -----------------------------------------------------

    /// Registers `callback` for every delivered `E`.
    pub fn on<E, C>(&mut self, callback: C) -> HandlerHandle<E>
    where
        E: DeviceEvent,
        C: FnMut(&E) + Send + 'static,
    {
        self.emitter.on(callback)
    }

    /// Registers `callback` for delivered `E` values accepted by `filter`.
    pub fn on_filtered<E, C, F>(&mut self, callback: C, filter: F) -> HandlerHandle<E>
    where
        E: DeviceEvent,
        C: FnMut(&E) + Send + 'static,
        F: Fn(&E) -> bool + Send + 'static,
    {
        self.emitter.on_filtered(callback, filter)
    }

    /// Unregisters a handler. Unknown handles are ignored.
    pub fn off<E: DeviceEvent>(&mut self, handle: &HandlerHandle<E>) -> bool {
        self.emitter.off(handle)
    }

    /// Removes every registered handler. Device switches are unchanged.
    pub fn clear(&mut self) {
        self.emitter.clear();
    }

    /// Returns true if no handler is registered for any input event.
    pub fn is_empty(&self) -> bool {
        self.emitter.is_empty()
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `event` to its handlers unless its device is disabled.
    pub fn emit<E: DeviceEvent>(&mut self, event: &E) {
        if !self.is_enabled(E::DEVICE) {
            trace!(target: "input", "{:?} input disabled, event dropped", E::DEVICE);
            return;
        }

        self.emitter.emit(event);
    }

    /// Unpacks a platform-normalized event and emits its payload.
    pub fn route(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed(e) => self.emit(e),
            InputEvent::KeyReleased(e) => self.emit(e),
            InputEvent::MousePressed(e) => self.emit(e),
            InputEvent::MouseReleased(e) => self.emit(e),
            InputEvent::MouseMoved(e) => self.emit(e),
            InputEvent::MouseWheel(e) => self.emit(e),
            InputEvent::TouchPressed(e) => self.emit(e),
            InputEvent::TouchReleased(e) => self.emit(e),
            InputEvent::TouchMoved(e) => self.emit(e),
            InputEvent::JoystickConnected(e) => self.emit(e),
            InputEvent::JoystickDisconnected(e) => self.emit(e),
            InputEvent::JoystickAxis(e) => self.emit(e),
            InputEvent::JoystickHat(e) => self.emit(e),
            InputEvent::JoystickPressed(e) => self.emit(e),
            InputEvent::JoystickReleased(e) => self.emit(e),
            InputEvent::GamepadConnected(e) => self.emit(e),
            InputEvent::GamepadDisconnected(e) => self.emit(e),
            InputEvent::GamepadAxis(e) => self.emit(e),
            InputEvent::GamepadPressed(e) => self.emit(e),
            InputEvent::GamepadReleased(e) => self.emit(e),
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    //--- Test Helpers -----------------------------------------------------

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (count.clone(), count)
    }

    fn key_pressed(key: KeyCode) -> KeyPressed {
        KeyPressed { key, modifiers: Modifiers::NONE, is_repeat: false }
    }

    fn mouse_pressed() -> MousePressed {
        MousePressed { x: 0.0, y: 0.0, button: MouseButton::Left, is_touch: false }
    }

    fn touch_pressed() -> TouchPressed {
        TouchPressed(Touch { id: TouchId(0), x: 0.0, y: 1.0, dx: 0.0, dy: 0.0, pressure: 0.0 })
    }

    fn joystick_connected() -> JoystickConnected {
        JoystickConnected { joystick: JoystickId(0) }
    }

    fn gamepad_connected() -> GamepadConnected {
        GamepadConnected { joystick: JoystickId(0) }
    }

    /// Registers a counting handler for `E`, emits once while enabled and
    /// once while disabled.
    fn assert_toggle<E: DeviceEvent>(device: InputDevice, event: E) {
        let (count, sink) = counter();
        let mut input = Input::new();
        input.on(move |_: &E| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        input.emit(&event);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        input.set_enabled(device, false);
        assert!(!input.is_enabled(device));
        input.emit(&event);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        input.set_enabled(device, true);
        input.emit(&event);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn toggles_keyboard_input() {
        assert_toggle(InputDevice::Keyboard, key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn toggles_mouse_input() {
        assert_toggle(InputDevice::Mouse, mouse_pressed());
    }

    #[test]
    fn toggles_touch_input() {
        assert_toggle(InputDevice::Touch, touch_pressed());
    }

    #[test]
    fn toggles_joystick_input() {
        assert_toggle(InputDevice::Joystick, joystick_connected());
    }

    #[test]
    fn toggles_gamepad_input() {
        assert_toggle(InputDevice::Gamepad, gamepad_connected());
    }

    #[test]
    fn disabling_one_device_keeps_others() {
        let (keys, key_sink) = counter();
        let (clicks, click_sink) = counter();
        let mut input = Input::new();
        input.on(move |_: &KeyPressed| {
            key_sink.fetch_add(1, Ordering::SeqCst);
        });
        input.on(move |_: &MousePressed| {
            click_sink.fetch_add(1, Ordering::SeqCst);
        });

        input.keyboard_enabled = false;
        input.emit(&key_pressed(KeyCode::KeyA));
        input.emit(&mouse_pressed());

        assert_eq!(keys.load(Ordering::SeqCst), 0);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn route_unpacks_payload() {
        let (count, sink) = counter();
        let mut input = Input::new();
        input.on_filtered(
            move |_: &KeyPressed| {
                sink.fetch_add(1, Ordering::SeqCst);
            },
            |e: &KeyPressed| e.key == KeyCode::Escape,
        );

        input.route(&InputEvent::KeyPressed(key_pressed(KeyCode::KeyA)));
        input.route(&InputEvent::KeyPressed(key_pressed(KeyCode::Escape)));
        input.route(&InputEvent::KeyReleased(KeyReleased {
            key: KeyCode::Escape,
            modifiers: Modifiers::NONE,
        }));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn route_respects_device_switch() {
        let (count, sink) = counter();
        let mut input = Input::new();
        input.on(move |_: &MouseWheel| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        input.mouse_enabled = false;
        input.route(&InputEvent::MouseWheel(MouseWheel { dx: 0.0, dy: 1.0 }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn off_and_clear_remove_handlers() {
        let (count, sink) = counter();
        let mut input = Input::new();
        let handle = input.on(move |_: &KeyPressed| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        input.on(|_: &MouseMoved| {});

        assert!(input.off(&handle));
        assert!(!input.off(&handle));
        input.emit(&key_pressed(KeyCode::KeyA));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        input.clear();
        assert!(input.is_empty());
    }
}
