//=========================================================================
// Input Event Types
//
// Defines the engine's representation of input events.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// fixed catalog of typed events. Each payload is its own type so that
// handlers registered through `Input::on` receive exactly one kind of
// event.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (batched across the thread boundary)
//         ↓
//    Input::route (unpacks the payload)
//         ↓
//    Emitter (typed handlers)
// ```
//
//=========================================================================

//=== Internal Imports ====================================================

use crate::core::emitter::Event;

//=== InputDevice =========================================================

/// Input source family. Each family can be disabled on [`super::Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    Keyboard,
    Mouse,
    Touch,
    Joystick,
    Gamepad,
}

/// An input payload tagged with the device family that produced it.
///
/// Only types implementing this trait can be registered for or emitted
/// through [`super::Input`].
pub trait DeviceEvent: Event {
    const DEVICE: InputDevice;
}

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Back side button.
    Back,

    /// Forward side button.
    Forward,

    /// Any other button, by platform index.
    Other(u16),
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    /// Keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt) at the time of a key event.
///
/// Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,

    /// Ctrl key (Command on macOS).
    pub ctrl: bool,

    /// Alt key (Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== Device Identifiers ==================================================

/// Identifies one finger for the duration of a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

/// Identifies a connected joystick or gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoystickId(pub u32);

/// Position of a joystick hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Centered,
    Up,
    Right,
    Down,
    Left,
    RightUp,
    RightDown,
    LeftUp,
    LeftDown,
}

/// Standard gamepad axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// Standard gamepad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

//=========================================================================
// Keyboard Events
//=========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPressed {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// True when generated by key auto-repeat.
    pub is_repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyReleased {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

//=========================================================================
// Mouse Events
//=========================================================================
//
// Coordinates are window pixels, top-left origin.
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePressed {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
    /// True when synthesized from a touch.
    pub is_touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseReleased {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoved {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub is_touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheel {
    pub dx: f32,
    pub dy: f32,
}

//=========================================================================
// Touch Events
//=========================================================================

/// Shared payload of every touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    /// Normalized 0-1, or 1.0 when the device has no pressure sensor.
    pub pressure: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPressed(pub Touch);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchReleased(pub Touch);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchMoved(pub Touch);

//=========================================================================
// Joystick Events
//=========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickConnected {
    pub joystick: JoystickId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickDisconnected {
    pub joystick: JoystickId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickAxis {
    pub joystick: JoystickId,
    pub axis: u32,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickHat {
    pub joystick: JoystickId,
    pub hat: u32,
    pub direction: HatDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickPressed {
    pub joystick: JoystickId,
    pub button: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickReleased {
    pub joystick: JoystickId,
    pub button: u32,
}

//=========================================================================
// Gamepad Events
//=========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadConnected {
    pub joystick: JoystickId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadDisconnected {
    pub joystick: JoystickId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadAxisMoved {
    pub joystick: JoystickId,
    pub axis: GamepadAxis,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadPressed {
    pub joystick: JoystickId,
    pub button: GamepadButton,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadReleased {
    pub joystick: JoystickId,
    pub button: GamepadButton,
}

//=== Device Tags =========================================================

impl DeviceEvent for KeyPressed { const DEVICE: InputDevice = InputDevice::Keyboard; }
impl DeviceEvent for KeyReleased { const DEVICE: InputDevice = InputDevice::Keyboard; }

impl DeviceEvent for MousePressed { const DEVICE: InputDevice = InputDevice::Mouse; }
impl DeviceEvent for MouseReleased { const DEVICE: InputDevice = InputDevice::Mouse; }
impl DeviceEvent for MouseMoved { const DEVICE: InputDevice = InputDevice::Mouse; }
impl DeviceEvent for MouseWheel { const DEVICE: InputDevice = InputDevice::Mouse; }

impl DeviceEvent for TouchPressed { const DEVICE: InputDevice = InputDevice::Touch; }
impl DeviceEvent for TouchReleased { const DEVICE: InputDevice = InputDevice::Touch; }
impl DeviceEvent for TouchMoved { const DEVICE: InputDevice = InputDevice::Touch; }

impl DeviceEvent for JoystickConnected { const DEVICE: InputDevice = InputDevice::Joystick; }
impl DeviceEvent for JoystickDisconnected { const DEVICE: InputDevice = InputDevice::Joystick; }
impl DeviceEvent for JoystickAxis { const DEVICE: InputDevice = InputDevice::Joystick; }
impl DeviceEvent for JoystickHat { const DEVICE: InputDevice = InputDevice::Joystick; }
impl DeviceEvent for JoystickPressed { const DEVICE: InputDevice = InputDevice::Joystick; }
impl DeviceEvent for JoystickReleased { const DEVICE: InputDevice = InputDevice::Joystick; }

impl DeviceEvent for GamepadConnected { const DEVICE: InputDevice = InputDevice::Gamepad; }
impl DeviceEvent for GamepadDisconnected { const DEVICE: InputDevice = InputDevice::Gamepad; }
impl DeviceEvent for GamepadAxisMoved { const DEVICE: InputDevice = InputDevice::Gamepad; }
impl DeviceEvent for GamepadPressed { const DEVICE: InputDevice = InputDevice::Gamepad; }
impl DeviceEvent for GamepadReleased { const DEVICE: InputDevice = InputDevice::Gamepad; }

//=== InputEvent ==========================================================

/// Platform-normalized input event.
///
/// This is what crosses the platform → core channel. [`super::Input::route`]
/// unpacks the payload and emits it as its own type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyPressed),
    KeyReleased(KeyReleased),
    MousePressed(MousePressed),
    MouseReleased(MouseReleased),
    MouseMoved(MouseMoved),
    MouseWheel(MouseWheel),
    TouchPressed(TouchPressed),
    TouchReleased(TouchReleased),
    TouchMoved(TouchMoved),
    JoystickConnected(JoystickConnected),
    JoystickDisconnected(JoystickDisconnected),
    JoystickAxis(JoystickAxis),
    JoystickHat(JoystickHat),
    JoystickPressed(JoystickPressed),
    JoystickReleased(JoystickReleased),
    GamepadConnected(GamepadConnected),
    GamepadDisconnected(GamepadDisconnected),
    GamepadAxis(GamepadAxisMoved),
    GamepadPressed(GamepadPressed),
    GamepadReleased(GamepadReleased),
}

impl InputEvent {
    /// Returns the device family of the wrapped payload.
    pub fn device(&self) -> InputDevice {
        match self {
            Self::KeyPressed(_) | Self::KeyReleased(_) => InputDevice::Keyboard,
            Self::MousePressed(_)
            | Self::MouseReleased(_)
            | Self::MouseMoved(_)
            | Self::MouseWheel(_) => InputDevice::Mouse,
            Self::TouchPressed(_) | Self::TouchReleased(_) | Self::TouchMoved(_) => {
                InputDevice::Touch
            }
            Self::JoystickConnected(_)
            | Self::JoystickDisconnected(_)
            | Self::JoystickAxis(_)
            | Self::JoystickHat(_)
            | Self::JoystickPressed(_)
            | Self::JoystickReleased(_) => InputDevice::Joystick,
            Self::GamepadConnected(_)
            | Self::GamepadDisconnected(_)
            | Self::GamepadAxis(_)
            | Self::GamepadPressed(_)
            | Self::GamepadReleased(_) => InputDevice::Gamepad,
        }
    }

    /// Returns true for events that may be merged within a frame
    /// (cursor motion, wheel scroll).
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved(_) | Self::MouseWheel(_))
    }

    /// Folds `next` into `self` when both are the same continuous kind.
    ///
    /// Cursor motion keeps the latest position and sums the deltas; wheel
    /// scroll sums both axes. Returns false (and leaves `self` untouched)
    /// for any other pair.
    pub fn coalesce(&mut self, next: &InputEvent) -> bool {
        match (self, next) {
            (Self::MouseMoved(acc), Self::MouseMoved(n)) => {
                acc.x = n.x;
                acc.y = n.y;
                acc.dx += n.dx;
                acc.dy += n.dy;
                acc.is_touch = n.is_touch;
                true
            }
            (Self::MouseWheel(acc), Self::MouseWheel(n)) => {
                acc.dx += n.dx;
                acc.dy += n.dy;
                true
            }
            _ => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
