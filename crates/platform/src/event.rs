//! Host window notifications and pointer payloads

use crate::{Point, Size};

/// A single pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Set of pointer buttons held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons { left: false, right: false, middle: false };
    pub const LEFT: MouseButtons = MouseButtons { left: true, right: false, middle: false };
    pub const RIGHT: MouseButtons = MouseButtons { left: false, right: true, middle: false };
    pub const LEFT_RIGHT: MouseButtons = MouseButtons { left: true, right: true, middle: false };

    pub fn contains(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}

/// Keyboard modifiers held while a pointer event happened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers { ctrl: false, shift: false, alt: false };
    pub const CTRL: KeyModifiers = KeyModifiers { ctrl: true, shift: false, alt: false };

    /// True when Ctrl is the only modifier held.
    pub fn ctrl_only(&self) -> bool {
        self.ctrl && !self.shift && !self.alt
    }
}

/// Full pointer state delivered with every pointer notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer position in screen coordinates
    pub position: Point,
    /// Button that changed state, if any (pressed or released)
    pub button: Option<MouseButton>,
    /// Buttons held after the event
    pub buttons: MouseButtons,
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    pub fn new(position: Point, button: Option<MouseButton>, buttons: MouseButtons) -> Self {
        Self {
            position,
            button,
            buttons,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Notification reported by a preview or overlay host window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Window moved; new outer location
    Moved { location: Point },
    /// Window resized; new outer and client sizes
    Resized { outer: Size, client: Size },
    PointerEntered,
    PointerLeft,
    PointerPressed(PointerEvent),
    PointerMoved(PointerEvent),
    PointerReleased(PointerEvent),
    HotkeyPressed,
}
