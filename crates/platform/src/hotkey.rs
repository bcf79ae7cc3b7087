//! Global hotkey definitions

use crate::PlatformError;
use std::fmt;
use std::str::FromStr;

/// Identifier handed out by the platform for a registered hotkey
pub type HotkeyId = i32;

/// Win32 `VK_*` values, restated so parsing builds on every target
mod vk {
    pub const TAB: u32 = 0x09;
    pub const ENTER: u32 = 0x0D;
    pub const ESCAPE: u32 = 0x1B;
    pub const SPACE: u32 = 0x20;
    pub const LEFT: u32 = 0x25;
    pub const UP: u32 = 0x26;
    pub const RIGHT: u32 = 0x27;
    pub const DOWN: u32 = 0x28;
    pub const NUMPAD0: u32 = 0x60;
    pub const F1: u32 = 0x70;
}

/// Keyboard modifiers for hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub win: bool,
}

/// Key combination bound to a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    /// Virtual key code (e.g. 'H' = 0x48)
    pub vk: u32,
}

impl Hotkey {
    pub fn new(modifiers: Modifiers, vk: u32) -> Self {
        Self { modifiers, vk }
    }
}

fn parse_vk(key: &str) -> Option<u32> {
    let key = key.trim().to_uppercase();

    if key.len() == 1 {
        let c = key.chars().next()?;
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            return Some(c as u32);
        }
    }

    if let Some(n) = key.strip_prefix("NUMPAD").and_then(|n| n.parse::<u32>().ok()) {
        if n <= 9 {
            return Some(vk::NUMPAD0 + n);
        }
    }

    if let Some(n) = key.strip_prefix('F').and_then(|n| n.parse::<u32>().ok()) {
        if (1..=24).contains(&n) {
            return Some(vk::F1 + n - 1);
        }
    }

    match key.as_str() {
        "LEFT" => Some(vk::LEFT),
        "RIGHT" => Some(vk::RIGHT),
        "UP" => Some(vk::UP),
        "DOWN" => Some(vk::DOWN),
        "TAB" => Some(vk::TAB),
        "SPACE" => Some(vk::SPACE),
        "ENTER" | "RETURN" => Some(vk::ENTER),
        "ESCAPE" | "ESC" => Some(vk::ESCAPE),
        _ => None,
    }
}

fn vk_name(code: u32) -> String {
    match code {
        c if (0x30..=0x39).contains(&c) || (0x41..=0x5A).contains(&c) => {
            char::from_u32(c).map(String::from).unwrap_or_default()
        }
        c if (vk::NUMPAD0..vk::NUMPAD0 + 10).contains(&c) => format!("NumPad{}", c - vk::NUMPAD0),
        c if (vk::F1..vk::F1 + 24).contains(&c) => format!("F{}", c - vk::F1 + 1),
        vk::LEFT => "Left".into(),
        vk::RIGHT => "Right".into(),
        vk::UP => "Up".into(),
        vk::DOWN => "Down".into(),
        vk::TAB => "Tab".into(),
        vk::SPACE => "Space".into(),
        vk::ENTER => "Enter".into(),
        vk::ESCAPE => "Escape".into(),
        c => format!("0x{:02X}", c),
    }
}

impl FromStr for Hotkey {
    type Err = PlatformError;

    /// Parses strings like `"F1"`, `"Ctrl+Alt+1"` or `"Shift+NumPad5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlatformError::InvalidHotkey(s.to_string());
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let (key, mods) = parts.split_last().ok_or_else(invalid)?;

        let mut modifiers = Modifiers::default();
        for part in mods {
            match part.to_uppercase().as_str() {
                "CTRL" | "CONTROL" => modifiers.ctrl = true,
                "ALT" => modifiers.alt = true,
                "SHIFT" => modifiers.shift = true,
                "WIN" | "SUPER" => modifiers.win = true,
                _ => return Err(invalid()),
            }
        }

        let vk = parse_vk(key).ok_or_else(invalid)?;
        Ok(Hotkey::new(modifiers, vk))
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.win {
            f.write_str("Win+")?;
        }
        f.write_str(&vk_name(self.vk))
    }
}
